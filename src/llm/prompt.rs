//! Extraction prompt sent to the model for every message.

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use std::fs;

/// Placeholder replaced with the message text.
pub const INPUT_PLACEHOLDER: &str = "{input_text}";

pub const DEFAULT_TEMPLATE: &str = r#"
Ты разбираешь сообщения из рабочего чата производства. Ответь строго по правилам.

1. Определи тип события:
- "Начало простоя" если оборудование остановилось
- "Устранение простоя" если оборудование снова работает
- "Появление ошибки" если сообщается о неисправности, которую нужно устранить

2. Выведи данные в одном блоке по шаблону:
[Тип: тип_события]
[Цех: номер_цеха]
[Агрегат: обозначение_агрегата]
[Информация: описание_проблемы] (ТОЛЬКО для ошибок)

3. Правила:
- Ищи обозначения вида "цех X", "станок Y", "агрегат Z"
- Для ошибки перенеси в Информацию всё описание проблемы
- Если поле не найдено, пиши "не указано"
- Не добавляй ничего кроме блока

Примеры ответов:
[Тип: Появление ошибки]
[Цех: 12]
[Агрегат: ПА-05]
[Информация: Гидравлическая утечка, требуется срочный ремонт]

[Тип: Начало простоя]
[Цех: 3]
[Агрегат: ЛМ-789]

Сообщение: {input_text}
Ответ:
"#;

/// The extraction template, held as a value so it can be swapped in tests
/// or overridden from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplate {
    /// A template must contain the `{input_text}` placeholder.
    pub fn new(text: impl Into<String>) -> AppResult<Self> {
        let text = text.into();
        if !text.contains(INPUT_PLACEHOLDER) {
            return Err(AppError::Config(format!(
                "prompt template has no {} placeholder",
                INPUT_PLACEHOLDER
            )));
        }
        Ok(Self { text })
    }

    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = fs::read_to_string(expand_tilde(path))?;
        Self::new(content)
    }

    /// Template from `prompt_file` if configured, the built-in one otherwise.
    pub fn from_option(path: Option<&str>) -> AppResult<Self> {
        match path {
            Some(p) if !p.trim().is_empty() => Self::from_file(p),
            _ => Ok(Self::default()),
        }
    }

    pub fn render(&self, message: &str) -> String {
        self.text.replace(INPUT_PLACEHOLDER, message.trim())
    }
}
