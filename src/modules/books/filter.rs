use super::models::Book;

/// Raw `GET /books` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

/// Fold raw query pairs; the first occurrence of a repeated key wins and
/// unknown keys are ignored, so listing never fails on the query string.
impl FromIterator<(String, String)> for ListQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = ListQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// Interpret a `0`/`1` query flag: `"0"` is false, anything else is true.
pub fn parse_flag(raw: &str) -> bool {
    raw.trim() != "0"
}

/// Restrictions applied while listing. Absent fields do not restrict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Case-insensitive substring of the book name.
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(needle) = &self.name {
            if !book.name().to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }

        if self.reading.is_some_and(|reading| book.is_reading() != reading) {
            return false;
        }

        if self
            .finished
            .is_some_and(|finished| book.is_finished() != finished)
        {
            return false;
        }

        true
    }
}

impl From<ListQuery> for BookFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            name: query.name,
            reading: query.reading.as_deref().map(parse_flag),
            finished: query.finished.as_deref().map(parse_flag),
        }
    }
}
