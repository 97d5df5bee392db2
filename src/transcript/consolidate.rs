use super::{SpeakerTranscript, Utterance};

/// Interleave all speakers' fragment sequences into one chronological
/// transcript.
///
/// Fragments are flattened in speaker-processing order and stable-sorted by
/// start time, so simultaneous utterances keep the order in which their
/// speakers finished transcription.
pub fn consolidate(speakers: &[SpeakerTranscript]) -> Vec<Utterance> {
    let mut combined: Vec<Utterance> = speakers
        .iter()
        .flat_map(|speaker| {
            speaker.fragments.iter().map(|fragment| Utterance {
                character: speaker.character.clone(),
                start: fragment.start,
                end: fragment.end,
                phrase: fragment.phrase.clone(),
            })
        })
        .collect();

    combined.sort_by(|a, b| a.start.total_cmp(&b.start));
    combined
}
