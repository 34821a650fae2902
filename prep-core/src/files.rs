use crate::constants::file_system;
use crate::error::{PrepError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 读取 JSON 文件，返回按键名排序的键值对列表
pub fn json_to_sorted_pairs<P: AsRef<Path>>(path: P) -> Result<Vec<(String, Value)>> {
    Ok(json_to_sorted_map(path)?.into_iter().collect())
}

/// 读取 JSON 文件，返回按键名排序的映射
/// 顶层必须是对象
pub fn json_to_sorted_map<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, Value>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(object) => Ok(object.into_iter().collect()),
        other => Err(PrepError::invalid_input(format!(
            "JSON 文件 {} 的顶层不是对象: {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 在分组列表中查找键，返回第一个包含该键的分组中的值；未找到时返回空列表
pub fn values_for_key(groups: &[BTreeMap<String, Vec<String>>], key: &str) -> Vec<String> {
    groups
        .iter()
        .find_map(|group| group.get(key))
        .cloned()
        .unwrap_or_default()
}

/// 检查并创建目录（可指定父目录），返回目录路径
pub fn check_and_create_directory(dir_name: &str, dir_parent: Option<&Path>) -> Result<PathBuf> {
    let path_directory = match dir_parent {
        Some(parent) => parent.join(dir_name),
        None => PathBuf::from(dir_name),
    };

    if path_directory.is_dir() {
        info!(
            "目录 '{}' 已存在: {}",
            dir_name,
            path_directory.display()
        );
    } else {
        fs::create_dir_all(&path_directory)?;
        info!(
            "目录 '{}' 创建成功: {}",
            dir_name,
            path_directory.display()
        );
    }

    Ok(path_directory)
}

/// 列出目录中指定扩展名的文件（不含 macOS 临时文件），按文件名排序
/// 扩展名需包含前导点，例如 ".csv"
pub fn list_files_by_type<P: AsRef<Path>>(directory: P, extension: &str) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.ends_with(extension) && !name.starts_with(file_system::MACOS_TEMP_PREFIX) {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

/// 返回脚本的绝对路径和文件名
pub fn script_info<P: AsRef<Path>>(file: P) -> Result<(PathBuf, String)> {
    let script_path = fs::canonicalize(file)?;
    let script_name = script_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok((script_path, script_name))
}

/// 生成SQL脚本头部注释
pub fn sql_header(title: &str) -> String {
    format!(
        "-- {title}\n-- 生成时间: {}\n\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )
}

/// 将生成的SQL写入文件，必要时创建目录
pub fn write_sql_file<P: AsRef<Path>>(dir: P, file_name: &str, sql: &str) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, sql)?;
    info!("   ✅ 写入SQL文件: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_json_sorted_by_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keys.json");
        fs::write(&path, r#"{"zeta": 1, "alpha": {"x": true}, "mid": "m"}"#).unwrap();

        let pairs = json_to_sorted_pairs(&path).unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
        assert_eq!(pairs[0].1, json!({"x": true}));

        let map = json_to_sorted_map(&path).unwrap();
        assert_eq!(map.keys().next().map(String::as_str), Some("alpha"));
        assert_eq!(map["zeta"], json!(1));
    }

    #[test]
    fn test_json_top_level_must_be_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            json_to_sorted_map(&path),
            Err(PrepError::InvalidInput(_))
        ));

        fs::write(&path, "{not json").unwrap();
        assert!(matches!(json_to_sorted_map(&path), Err(PrepError::Json(_))));
    }

    #[test]
    fn test_values_for_key() {
        let groups = vec![
            BTreeMap::from([("a".to_string(), vec!["1".to_string()])]),
            BTreeMap::from([("b".to_string(), vec!["2".to_string(), "3".to_string()])]),
            BTreeMap::from([("b".to_string(), vec!["ignored".to_string()])]),
        ];
        assert_eq!(values_for_key(&groups, "b"), vec!["2", "3"]);
        assert!(values_for_key(&groups, "c").is_empty());
    }

    #[test]
    fn test_check_and_create_directory() {
        let dir = TempDir::new().unwrap();
        let created = check_and_create_directory("output", Some(dir.path())).unwrap();
        assert!(created.is_dir());
        assert_eq!(created, dir.path().join("output"));

        // 已存在时不报错
        let again = check_and_create_directory("output", Some(dir.path())).unwrap();
        assert_eq!(again, created);
    }

    #[test]
    fn test_list_files_by_type() {
        let dir = TempDir::new().unwrap();
        for name in ["b.csv", "a.csv", "._a.csv", "notes.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = list_files_by_type(dir.path(), ".csv").unwrap();
        assert_eq!(files, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_script_info_and_write_sql_file() {
        let dir = TempDir::new().unwrap();
        let path = write_sql_file(dir.path().join("sql"), "01_users.sql", "SELECT 1;\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "SELECT 1;\n");

        let (absolute, name) = script_info(&path).unwrap();
        assert!(absolute.is_absolute());
        assert_eq!(name, "01_users.sql");
    }

    #[test]
    fn test_sql_header() {
        let header = sql_header("表 users");
        assert!(header.starts_with("-- 表 users\n-- 生成时间: "));
        assert!(header.ends_with(" UTC\n\n"));
    }
}
