use archivist::{allocate_note_path, create_note, NameTemplate};
use tempfile::TempDir;

#[tokio::test]
async fn next_number_is_max_plus_one() {
    let vault = TempDir::new().unwrap();
    let dir = vault.path().join("Sessions");
    std::fs::create_dir_all(&dir).unwrap();
    for name in ["Session-1.md", "Session-2.md", "Session-5.md"] {
        std::fs::write(dir.join(name), "# old\n").unwrap();
    }

    let template = NameTemplate::parse("Session-{number}").unwrap();
    let path = allocate_note_path(vault.path(), "Sessions", &template, "Название")
        .await
        .unwrap();

    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "Session-6.md");
}

#[tokio::test]
async fn empty_directory_starts_at_one() {
    let vault = TempDir::new().unwrap();

    let template = NameTemplate::parse("Session-{number}").unwrap();
    let path = allocate_note_path(vault.path(), "Sessions", &template, "Название")
        .await
        .unwrap();

    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "Session-1.md");
    // The subdirectory is created on demand.
    assert!(vault.path().join("Sessions").is_dir());
}

#[tokio::test]
async fn non_matching_entries_are_ignored() {
    let vault = TempDir::new().unwrap();
    let dir = vault.path().join("Sessions");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("Session-3.md"), "").unwrap();
    std::fs::write(dir.join("Session-notes.md"), "").unwrap();
    std::fs::write(dir.join("Session-9.txt"), "").unwrap();
    std::fs::create_dir(dir.join("Session-100.md.d")).unwrap();

    let template = NameTemplate::parse("Session-{number}").unwrap();
    let path = allocate_note_path(vault.path(), "Sessions", &template, "Название")
        .await
        .unwrap();

    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "Session-4.md");
}

#[tokio::test]
async fn name_placeholder_template_allocates_next_number() {
    let vault = TempDir::new().unwrap();
    let dir = vault.path().join("Сессии");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("Сессия 3 - Старый поход.md"), "").unwrap();

    let template = NameTemplate::parse("Сессия {number} - {name}").unwrap();
    let path = allocate_note_path(vault.path(), "Сессии", &template, "Новый поход")
        .await
        .unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "Сессия 4 - Новый поход.md"
    );
}

#[tokio::test]
async fn create_note_writes_title_heading_and_summary() {
    let vault = TempDir::new().unwrap();

    let template = NameTemplate::parse("Session-{number}").unwrap();
    let path = create_note(
        vault.path(),
        "Sessions",
        &template,
        "Название",
        "Отряд вошёл в подземелье.",
    )
    .await
    .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "# Название\n\nОтряд вошёл в подземелье.\n");
}

#[tokio::test]
async fn create_note_without_summary_writes_heading_only() {
    let vault = TempDir::new().unwrap();

    let template = NameTemplate::parse("Session-{number}").unwrap();
    let path = create_note(vault.path(), "Sessions", &template, "Название", "")
        .await
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "# Название\n\n");
}

#[tokio::test]
async fn successive_allocations_do_not_collide() {
    let vault = TempDir::new().unwrap();
    let template = NameTemplate::parse("Session-{number}").unwrap();

    let first = create_note(vault.path(), "Sessions", &template, "Название", "a")
        .await
        .unwrap();
    let second = create_note(vault.path(), "Sessions", &template, "Название", "b")
        .await
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(second.file_name().unwrap().to_str().unwrap(), "Session-2.md");
}
