//! Reply texts sent back to users

use crate::domain::entities::{Category, Rejection, MAX_QUANTITY};

pub const WRONG_FORMAT: &str = "Введите правильное количество картинок, например: \"люди 10\"\n\
Enter a valid number of pictures, e.g. \"people 10\"";

pub const UNKNOWN_CATEGORY: &str = "Пожалуйста, введите категорию картинки, например: \"люди 10\"\n\
Please enter a picture category, e.g. \"people 10\"";

pub const EMPTY_CATEGORY: &str = "В этой категории нет картинок\n\
There are no pictures in this category";

pub const NOTHING_REQUESTED: &str = "Укажите хотя бы одну картинку, например: \"люди 1\"\n\
Ask for at least one picture, e.g. \"people 1\"";

pub const UNAVAILABLE: &str = "Не удалось загрузить картинки, попробуйте позже\n\
Could not load pictures, please try again later";

pub fn too_many() -> String {
    format!(
        "Картинок не должно быть больше {max}\nNo more than {max} pictures per message",
        max = MAX_QUANTITY
    )
}

/// Text for a rejected message
pub fn rejection(reason: Rejection) -> String {
    match reason {
        Rejection::TooManyWords | Rejection::MalformedQuantity => WRONG_FORMAT.to_string(),
        Rejection::QuantityTooLarge => too_many(),
        Rejection::Empty | Rejection::UnknownCategory => UNKNOWN_CATEGORY.to_string(),
    }
}

/// Category list followed by usage help
pub fn info(categories: &[Category]) -> String {
    let list: String = categories.iter().map(|c| format!("{}, ", c.folder())).collect();

    format!(
        "Полный список доступных категорий: {list}\n\n\
Для того чтобы получить рандомную картинку из категории, отправьте категорию картинки.\n\
Если вы хотите получить несколько картинок из категории, отправьте \"категория 10\", где 10 - количество картинок\n\n\
Максимальное количество картинок в одном сообщении - {max}\n\n\
Available categories: {list}\n\n\
Send a category name to get a random picture from it.\n\
Send \"category 10\" to get several pictures, where 10 is the number of pictures.\n\n\
At most {max} pictures per message",
        list = list,
        max = MAX_QUANTITY
    )
}
