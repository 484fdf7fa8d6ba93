//! User-facing texts and the main inline keyboard

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Callback data of the "check subscription" button
pub const CALLBACK_CHECK_SUB: &str = "check_sub";
/// Callback data of the "info" button
pub const CALLBACK_INFO: &str = "info";

pub const MSG_FORBIDDEN: &str = "ممنوع — هذا البوت غير متاح لك.";
pub const MSG_WELCOME: &str = "أهلاً! يمكنك استخدام أزرار التحكم أدناه.";
pub const MSG_INFO_COMMAND: &str = "هذا بوت تحكم بسيط. فقط المالك المسموح له يستخدم هذه الوظائف.";
pub const MSG_INFO_CALLBACK: &str = "معلومات: هذا بوت لعرض أزرار والتحقق من الاشتراك.";

pub fn not_subscribed(channel: &str) -> String {
    format!("الرجاء الاشتراك في القناة {} لاستخدام البوت.", channel)
}

pub fn subscription_verified(channel: &str) -> String {
    format!("تم التحقق: أنت مشترك في {} ✅", channel)
}

/// Two buttons, one per row: check subscription, info
pub fn main_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("التحقق من الاشتراك", CALLBACK_CHECK_SUB)],
        vec![InlineKeyboardButton::callback("معلومات", CALLBACK_INFO)],
    ])
}
