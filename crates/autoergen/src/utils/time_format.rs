use chrono::Local;

/// 标准时间字符串，与 SQLite CURRENT_TIMESTAMP 同为秒级精度
pub fn now_standard_string() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
