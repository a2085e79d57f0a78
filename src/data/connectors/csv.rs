use crate::error::{MagiqueError, Result};
use ::csv::ReaderBuilder;
use std::path::Path;

/// One owned stack: `count` physical copies of `name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    pub count: usize,
    pub name: String,
}

/// Reads owned-card lists
///
/// Each record is `count,name` or a bare `name` (one copy). Fields follow CSV
/// quoting, so `2,"Kongming, ""Sleeping Dragon"""` is two copies of
/// `Kongming, "Sleeping Dragon"`. An unquoted name may still contain commas
/// (`Jace, the Mind Sculptor`); only a leading integer field is treated as a
/// count. Blank lines, `#` comments and a `count,name` header are skipped.
pub struct CsvConnector;

impl CsvConnector {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<CollectionEntry>> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(text: &str) -> Result<Vec<CollectionEntry>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(text.as_bytes());

        let mut entries = Vec::new();

        for record in reader.records() {
            let record = record?;
            let line_no = record.position().map_or(0, |p| p.line());

            let fields: Vec<&str> = record.iter().collect();
            if fields.iter().all(|f| f.trim().is_empty()) || Self::is_header(&fields) {
                continue;
            }

            let (count, name_fields) = match fields.split_first() {
                Some((first, rest)) if !rest.is_empty() && Self::is_count(first) => {
                    let count = first.trim().parse::<usize>().map_err(|e| {
                        MagiqueError::Parse(format!("Line {}: bad count '{}': {}", line_no, first, e))
                    })?;
                    (count, rest)
                }
                _ => (1, fields.as_slice()),
            };

            // Unquoted commas split the name; put it back together
            let name = name_fields.join(",");
            let name = name.trim();
            if name.is_empty() {
                return Err(MagiqueError::Parse(format!("Line {}: missing card name", line_no)));
            }
            if count == 0 {
                log::warn!("Line {}: zero copies of {}, skipping", line_no, name);
                continue;
            }

            entries.push(CollectionEntry {
                count,
                name: name.to_string(),
            });
        }

        Ok(entries)
    }

    fn is_count(field: &str) -> bool {
        let field = field.trim();
        !field.is_empty() && field.chars().all(|c| c.is_ascii_digit())
    }

    fn is_header(fields: &[&str]) -> bool {
        matches!(
            fields,
            [count, name, ..] if count.trim().eq_ignore_ascii_case("count")
                && name.trim().eq_ignore_ascii_case("name")
        )
    }
}
