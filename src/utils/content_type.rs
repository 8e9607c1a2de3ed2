/// 根据扩展名推断对象的 MIME 类型，并用文件头的魔术字节校验
///
/// 返回 `None` 表示扩展名不在允许列表中，或者内容与扩展名不符。
pub fn detect_content_type(file_name: &str, head: &[u8]) -> Option<&'static str> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())?;

    let (mime, matches) = match extension.as_str() {
        "pdf" => ("application/pdf", head.starts_with(b"%PDF")),
        "png" => (
            "image/png",
            head.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ),
        "jpg" | "jpeg" => ("image/jpeg", head.starts_with(&[0xFF, 0xD8, 0xFF])),
        "gif" => (
            "image/gif",
            head.starts_with(b"GIF87a") || head.starts_with(b"GIF89a"),
        ),
        "zip" => ("application/zip", head.starts_with(&[0x50, 0x4B, 0x03, 0x04])),
        "docx" => (
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            head.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        ),
        "pptx" => (
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            head.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        ),
        "xlsx" => (
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            head.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        ),
        // 文本格式不检查魔术字节，但必须是 UTF-8
        "txt" => ("text/plain; charset=utf-8", is_text(head)),
        "md" => ("text/markdown; charset=utf-8", is_text(head)),
        "csv" => ("text/csv; charset=utf-8", is_text(head)),
        "json" => ("application/json", is_text(head)),
        _ => return None,
    };

    matches.then_some(mime)
}

// 截断位置可能落在多字节字符中间，只要求前缀合法
fn is_text(head: &[u8]) -> bool {
    match std::str::from_utf8(head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}
