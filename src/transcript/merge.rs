use super::Fragment;

/// Gap under which a repeated phrase counts as a continuation of the
/// previous fragment rather than a new utterance.
pub const MERGE_EPSILON_SECS: f64 = 0.001;

/// Collapse adjacent duplicate fragments in one speaker's sequence.
///
/// The transcription engine emits the same phrase twice when an utterance
/// straddles a decoding window boundary; the second copy starts where the
/// first one ended. Such pairs are folded into a single fragment spanning
/// both. Running the merge on already-merged input returns it unchanged.
pub fn merge_adjacent_duplicates(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut iter = fragments.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    for next in iter {
        if next.phrase == current.phrase && (next.start - current.end).abs() < MERGE_EPSILON_SECS {
            current.end = next.end;
        } else {
            merged.push(std::mem::replace(&mut current, next));
        }
    }
    merged.push(current);
    merged
}
