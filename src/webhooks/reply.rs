//! User-facing reply texts.

use crate::database::models::ViolationRecord;

pub const EMPTY_REQUEST: &str = "Ошибка: пустой запрос";
pub const DESCRIBE_PROMPT: &str =
    "Пожалуйста, опишите правонарушение. Например: 'Свалили мусор в лесу'";
pub const FALLBACK: &str =
    "Извините, я не понял ваш запрос. Пожалуйста, выберите один из пунктов меню.";
pub const INTERNAL_ERROR: &str = "Произошла внутренняя ошибка сервера.";

pub fn classification(violation: &ViolationRecord) -> String {
    format!(
        "📋 **Классификация правонарушения:**\n\n\
         *Тип нарушения:* {}\n\
         *Описание:* {}\n\
         *Статья закона:* {}\n\n\
         Теперь вы можете узнать о наказании или куда обращаться.",
        violation.violation_type, violation.description, violation.law_article
    )
}

pub fn punishment(violation: &ViolationRecord) -> String {
    format!(
        "⚖️ **Ответственность за нарушение:**\n\n\
         *Тип нарушения:* {}\n\
         *Статья закона:* {}\n\
         *Наказание:* {}",
        violation.violation_type, violation.law_article, violation.punishment
    )
}

pub fn authority(violation: &ViolationRecord) -> String {
    format!(
        "🏛 **Куда обращаться:**\n\n\
         *Тип нарушения:* {}\n\
         *Ответственный орган:* {}\n\
         *Как составить обращение:* {}",
        violation.violation_type, violation.authority, violation.appeal_tips
    )
}

pub fn unclassified(description: &str) -> String {
    format!(
        "Не удалось классифицировать нарушение: '{}'. Опишите более подробно.",
        description
    )
}
