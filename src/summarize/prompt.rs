use crate::error::{ArchivistError, Result};
use crate::transcript::Utterance;

/// Instructions for rewriting the session transcript as a continuous
/// narrative. The transcript JSON is appended below the instructions.
const NARRATIVE_INSTRUCTIONS: &str = r#"
Ты — помощник, задача которого — преобразовать диалоговую расшифровку игры в Dungeons & Dragons в плавный художественный рассказ.

Входящие данные — отсортированный JSON-массив, где каждый элемент имеет поля:

[
  {
    "character": "имя-персонажа",
    "startTime": "время-начала-реплики",
    "endTime": "время-конца-реплики",
    "phrase": "реплика-на-английском"
  }
]

Описание задачи:

1. Перепиши все реплики в форме художественного текста на русском языке.
2. Сохрани и пронумеруй всех персонажей по именам, которые встречаются в поле "character". Имена могут быть транслитерированы или искажены, но важно сохранять их в тексте последовательно, без изменений.
3. Повествование должно быть непрерывным и хронологическим — следуй строго порядку элементов массива.
4. Не включай в текст никаких мета-сведений, игровых механик, правил или терминов, относящихся к игре или её процессу.
5. Переводи смысл реплик, придавая им литературную форму: отделяй описание действий и реакций персонажей, добавляй связки и контекст, чтобы текст читалcя как художественный рассказ.
6. Если в репликах есть эмоции, интонации или действия, попытайся их передать через художественные средства (описания, эпитеты, мимику и т.п.).
7. Следи за плавностью и логикой переходов, используя подходящие связующие слова, но не добавляй ничего, чего нет в исходном тексте.
8. Не изменяй сюжет и смысл сказанного.

---

Входные данные (JSON):
"#;

/// Render the full summarization prompt for a consolidated transcript.
pub fn build_prompt(transcript: &[Utterance]) -> Result<String> {
    let payload = serde_json::to_string_pretty(transcript).map_err(|error| {
        ArchivistError::Summarization {
            message: format!("failed to encode transcript: {error}"),
        }
    })?;

    Ok(format!("{NARRATIVE_INSTRUCTIONS}\n{payload}\n"))
}
