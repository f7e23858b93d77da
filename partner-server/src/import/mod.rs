//! 员工批量导入的文件解析
//!
//! 接受带表头的 CSV，表头按别名模糊匹配到已知列。
//! 只有邮箱列是必需的：缺了直接拒绝整份文件，
//! 邮箱为空的行跳过但不算失败。

use serde::Serialize;

use shared::error::{AppError, AppResult, ErrorCode};

/// 各逻辑列的表头别名，匹配时对表头做不区分大小写的子串比较
const EMAIL_ALIASES: &[&str] = &["email", "e-mail", "mail", "correo"];
const FIRST_NAME_ALIASES: &[&str] = &["first name", "firstname", "first_name", "given name"];
const LAST_NAME_ALIASES: &[&str] = &["last name", "lastname", "last_name", "surname", "family name"];
const NAME_ALIASES: &[&str] = &["full name", "employee name", "name", "nombre"];
const PHONE_ALIASES: &[&str] = &["phone", "mobile", "contact", "telefono"];
const DEPARTMENT_ALIASES: &[&str] = &["department", "dept", "team", "departamento"];

/// 表头到逻辑列的映射结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub email: usize,
    pub first_name: Option<usize>,
    pub last_name: Option<usize>,
    pub name: Option<usize>,
    pub phone: Option<usize>,
    pub department: Option<usize>,
}

fn find_column(
    headers: &[String],
    aliases: &[&str],
    claimed: &mut Vec<usize>,
) -> Option<usize> {
    for alias in aliases {
        for (idx, header) in headers.iter().enumerate() {
            if claimed.contains(&idx) {
                continue;
            }
            if header.to_lowercase().contains(alias) {
                claimed.push(idx);
                return Some(idx);
            }
        }
    }
    None
}

/// 解析表头，映射失败 (找不到邮箱列) 时拒绝文件
///
/// 解析顺序很重要：first/last name 先于通用 name 匹配，
/// 避免 "First Name" 被当成全名列。
pub fn resolve_columns(headers: &[String]) -> AppResult<ColumnMap> {
    let mut claimed: Vec<usize> = Vec::new();

    let email = find_column(headers, EMAIL_ALIASES, &mut claimed).ok_or_else(|| {
        AppError::new(ErrorCode::ImportEmailColumnMissing)
            .with_detail("headers", serde_json::json!(headers))
    })?;
    let first_name = find_column(headers, FIRST_NAME_ALIASES, &mut claimed);
    let last_name = find_column(headers, LAST_NAME_ALIASES, &mut claimed);
    let name = find_column(headers, NAME_ALIASES, &mut claimed);
    let phone = find_column(headers, PHONE_ALIASES, &mut claimed);
    let department = find_column(headers, DEPARTMENT_ALIASES, &mut claimed);

    Ok(ColumnMap {
        email,
        first_name,
        last_name,
        name,
        phone,
        department,
    })
}

/// 文件中的一行员工数据 (已清洗)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportedRow {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport {
    pub rows: Vec<ImportedRow>,
    /// 邮箱为空被跳过的行数
    pub skipped: u32,
}

fn cell<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// 解析整份 CSV
pub fn parse_csv(data: &[u8]) -> AppResult<ParsedImport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("Unreadable CSV header: {e}"))
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(AppError::new(ErrorCode::ImportEmptyFile));
    }

    let columns = resolve_columns(&headers)?;

    let mut rows = Vec::new();
    let mut skipped = 0_u32;

    for record in reader.records() {
        let record = record.map_err(|e| {
            AppError::with_message(ErrorCode::InvalidFormat, format!("Unreadable CSV row: {e}"))
        })?;

        let email = cell(&record, Some(columns.email)).to_lowercase();
        if email.is_empty() {
            skipped += 1;
            continue;
        }

        // 优先用全名列，否则拼接 first + last
        let name = match non_empty(cell(&record, columns.name)) {
            Some(full) => full,
            None => {
                let first = cell(&record, columns.first_name);
                let last = cell(&record, columns.last_name);
                [first, last]
                    .iter()
                    .filter(|p| !p.is_empty())
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        };

        rows.push(ImportedRow {
            email,
            name,
            phone: non_empty(cell(&record, columns.phone)),
            department: non_empty(cell(&record, columns.department)),
        });
    }

    if rows.is_empty() && skipped == 0 {
        return Err(AppError::new(ErrorCode::ImportEmptyFile));
    }

    Ok(ParsedImport { rows, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_exact_headers() {
        let map = resolve_columns(&headers(&["Email", "Name", "Phone", "Department"])).unwrap();
        assert_eq!(map.email, 0);
        assert_eq!(map.name, Some(1));
        assert_eq!(map.phone, Some(2));
        assert_eq!(map.department, Some(3));
    }

    #[test]
    fn test_resolve_fuzzy_headers() {
        let map = resolve_columns(&headers(&[
            "Employee E-Mail Address",
            "First Name",
            "Last Name",
            "Mobile No.",
            "Dept",
        ]))
        .unwrap();
        assert_eq!(map.email, 0);
        assert_eq!(map.first_name, Some(1));
        assert_eq!(map.last_name, Some(2));
        // "Name" 别名不抢占已被 first/last 认领的列
        assert_eq!(map.name, None);
        assert_eq!(map.phone, Some(3));
        assert_eq!(map.department, Some(4));
    }

    #[test]
    fn test_missing_email_column_rejected() {
        let err = resolve_columns(&headers(&["Name", "Phone"])).unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::ImportEmailColumnMissing);
    }

    #[test]
    fn test_parse_basic_csv() {
        let csv = b"Email,Full Name,Phone\n\
            ana@example.com,Ana Ruiz,600111222\n\
            luis@example.com,Luis Ortega,\n";
        let parsed = parse_csv(csv).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.rows[0].email, "ana@example.com");
        assert_eq!(parsed.rows[0].name, "Ana Ruiz");
        assert_eq!(parsed.rows[0].phone.as_deref(), Some("600111222"));
        assert_eq!(parsed.rows[1].phone, None);
    }

    #[test]
    fn test_empty_email_rows_skipped() {
        let csv = b"Email,Name\n\
            ana@example.com,Ana\n\
            ,Ghost Row\n\
            luis@example.com,Luis\n";
        let parsed = parse_csv(csv).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_name_built_from_first_and_last() {
        let csv = b"Email,First Name,Last Name\n\
            ana@example.com,Ana,Ruiz\n\
            solo@example.com,Solo,\n";
        let parsed = parse_csv(csv).unwrap();
        assert_eq!(parsed.rows[0].name, "Ana Ruiz");
        assert_eq!(parsed.rows[1].name, "Solo");
    }

    #[test]
    fn test_email_normalized_to_lowercase() {
        let csv = b"Email\nANA@Example.COM\n";
        let parsed = parse_csv(csv).unwrap();
        assert_eq!(parsed.rows[0].email, "ana@example.com");
    }

    #[test]
    fn test_file_without_email_column_rejected() {
        let csv = b"Name,Phone\nAna,600\n";
        let err = parse_csv(csv).unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::ImportEmailColumnMissing);
    }

    #[test]
    fn test_file_with_header_only_rejected() {
        let csv = b"Email,Name\n";
        let err = parse_csv(csv).unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::ImportEmptyFile);
    }
}
