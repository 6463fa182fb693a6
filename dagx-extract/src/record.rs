//! Corpus records
//!
//! One record per extracted DAG, one line per record:
//! `<instruction count>,<escaped module text>`. The text is escaped as the
//! body of a JSON string, with commas additionally written as `\u002c`, so
//! a record never contains a raw newline, quote or comma after the prefix.

use std::fmt;
use std::fs;
use std::path::Path;

use dagx_common::DagError;
use dagx_ir::Module;

/// Escape `text` so it fits in a single comma-delimited field
pub fn escape(text: &str) -> Result<String, DagError> {
    let quoted = serde_json::to_string(text).map_err(|e| DagError::from(e.to_string()))?;
    let body = &quoted[1..quoted.len() - 1];
    Ok(body.replace(',', "\\u002c"))
}

/// Inverse of [`escape`]
pub fn unescape(field: &str) -> Result<String, serde_json::Error> {
    serde_json::from_str(&format!("\"{field}\""))
}

/// Append the record of one synthetic module to `out`
pub fn write_record(out: &mut String, count: usize, module: &Module) -> Result<(), DagError> {
    let escaped = escape(&module.to_string())?;
    out.push_str(&count.to_string());
    out.push(',');
    out.push_str(&escaped);
    out.push('\n');
    Ok(())
}

/// A decoded corpus line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Number of DAG instructions in the module
    pub count: usize,
    /// Rendered module text, unescaped
    pub text: String,
}

impl Record {
    /// Parse one corpus line (without its trailing newline).
    /// `line_no` is only used in error messages.
    pub fn parse(line: &str, line_no: usize) -> Result<Self, DagError> {
        let (count, field) = line
            .split_once(',')
            .ok_or_else(|| DagError::malformed_record(line_no, "missing ',' after count"))?;
        let count = count
            .parse::<usize>()
            .map_err(|e| DagError::malformed_record(line_no, format!("bad count '{count}': {e}")))?;
        let text = unescape(field)
            .map_err(|e| DagError::malformed_record(line_no, format!("bad escape: {e}")))?;
        Ok(Self { count, text })
    }

    /// Body lines that define a value (`%x = ...`), trimmed
    pub fn instruction_lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().filter_map(|line| {
            let body = line.trim_start();
            let indented = body.len() < line.len();
            (indented && body.starts_with('%') && body.contains('=')).then_some(body)
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escaped = escape(&self.text).map_err(|_| fmt::Error)?;
        write!(f, "{},{escaped}", self.count)
    }
}

/// Read every record of a corpus file
pub fn read_records(path: &Path) -> Result<Vec<Record>, DagError> {
    let content = fs::read_to_string(path)?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| Record::parse(line, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_neutralizes_delimiters() {
        let text = "define void @w(i32 %0, i32 %1) {\n  ret \"void\"\\\n}\n";
        let escaped = escape(text).unwrap();
        assert!(!escaped.contains('\n'));
        assert!(!escaped.contains(','));
        assert!(!escaped.contains('"') || escaped.contains("\\\""));
        assert_eq!(unescape(&escaped).unwrap(), text);
    }

    #[test]
    fn test_record_line_format() {
        let mut module = Module::new("dag".to_string());
        module.add_function(dagx_ir::Function::new("wrapper".to_string(), dagx_ir::IrType::Void));

        let mut out = String::new();
        write_record(&mut out, 3, &module).unwrap();
        assert!(out.starts_with("3,"));
        assert!(out.ends_with('\n'));
        assert_eq!(out.matches('\n').count(), 1);

        let record = Record::parse(out.trim_end_matches('\n'), 1).unwrap();
        assert_eq!(record.count, 3);
        assert_eq!(record.text, module.to_string());
    }

    #[test]
    fn test_instruction_lines() {
        let record = Record {
            count: 2,
            text: "define void @wrapper(i32 %0) {\nL0:\n  %1 = add i32 %0, 1\n  %2 = mul i32 %1, %1\n  br label %L1\nL1:\n  call void @use-0(i32 %2)\n  ret void\n}\n".to_string(),
        };
        let lines: Vec<&str> = record.instruction_lines().collect();
        assert_eq!(lines, vec!["%1 = add i32 %0, 1", "%2 = mul i32 %1, %1"]);
        assert_eq!(record.to_string(), format!("2,{}", escape(&record.text).unwrap()));
    }

    #[test]
    fn test_malformed_records() {
        assert!(matches!(
            Record::parse("no comma here", 7),
            Err(DagError::MalformedRecord { line: 7, .. })
        ));
        assert!(matches!(
            Record::parse("x,abc", 1),
            Err(DagError::MalformedRecord { line: 1, .. })
        ));
        assert!(matches!(
            Record::parse("1,bad\\qescape", 2),
            Err(DagError::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_read_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dags.txt");
        let first = Record { count: 1, text: "a,b\n".to_string() };
        let second = Record { count: 4, text: "\"q\"\n".to_string() };
        fs::write(&path, format!("{first}\n{second}\n")).unwrap();

        assert_eq!(read_records(&path).unwrap(), vec![first, second]);
    }
}
