use once_cell::sync::Lazy;
use regex::Regex;

static ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("Invalid identifier regex"));

/// 最多一次查询的课程数
pub const MAX_COURSE_IDS: usize = 100;

pub fn validate_id(id: &str) -> Result<(), &'static str> {
    // ID 只能包含字母、数字、下划线或连字符，长度 1..=64
    if !ID_RE.is_match(id) {
        return Err("Identifier must be 1-64 letters, numbers, underscores or hyphens");
    }
    Ok(())
}

/// 解析逗号分隔的 ID 列表，去除空白与重复项并保持顺序
pub fn parse_id_list(raw: &str) -> Result<Vec<String>, &'static str> {
    let mut ids: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        validate_id(id)?;
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    if ids.len() > MAX_COURSE_IDS {
        return Err("Too many identifiers in one request");
    }
    Ok(ids)
}

pub fn validate_title(title: &str) -> Result<(), &'static str> {
    let len = title.trim().chars().count();
    if len == 0 || len > 200 {
        return Err("Title length must be between 1 and 200 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("6f1c9a2e-1b2c-4d5e-8f90-a1b2c3d4e5f6").is_ok());
        assert!(validate_id("course_1").is_ok());
        assert!(validate_id("").is_err());
        assert!(validate_id("a/b").is_err());
        assert!(validate_id("x'; drop table").is_err());
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(
            parse_id_list(" c1, c2,,c1 ").unwrap(),
            vec!["c1".to_string(), "c2".to_string()]
        );
        assert!(parse_id_list("").unwrap().is_empty());
        assert!(parse_id_list("c1,bad id").is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Week 1 slides").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(201)).is_err());
    }
}
