use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Title type in the rating source's own vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleType {
    Movie,
    Series,
    Episode,
    Game,
    #[default]
    #[serde(other)]
    Other,
}

impl TitleType {
    /// Series and their episodes are both rated as series.
    pub fn is_series(&self) -> bool {
        matches!(self, TitleType::Series | TitleType::Episode)
    }
}

/// Title lookup result with normalized rating fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Type", default)]
    pub title_type: TitleType,
    #[serde(rename = "imdbRating", default, deserialize_with = "de_rating")]
    pub imdb_rating: Option<f64>,
    #[serde(rename = "imdbVotes", default, deserialize_with = "de_votes")]
    pub imdb_votes: Option<i64>,
}

/// Parse a display number: "8.8", "2,200,000", 8.8. "N/A" and blanks are absent.
fn parse_display_number(value: Option<Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
                return None;
            }
            s.replace(',', "").parse::<f64>().ok()
        }
        _ => None,
    }
}

fn de_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(parse_display_number(value).filter(|r| r.is_finite() && (0.0..=10.0).contains(r)))
}

fn de_votes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(parse_display_number(value)
        .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
        .map(|v| v as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_from_display_strings() {
        let title: Title = serde_json::from_value(json!({
            "Title": "Fight Club",
            "Year": "1999",
            "imdbID": "tt0137523",
            "Type": "movie",
            "imdbRating": "8.8",
            "imdbVotes": "2,200,000",
            "Response": "True"
        }))
        .unwrap();

        assert_eq!(title.imdb_id, "tt0137523");
        assert_eq!(title.title_type, TitleType::Movie);
        assert_eq!(title.imdb_rating, Some(8.8));
        assert_eq!(title.imdb_votes, Some(2_200_000));
    }

    #[test]
    fn test_title_accepts_numbers() {
        let title: Title = serde_json::from_value(json!({
            "imdbID": "tt0903747",
            "Type": "series",
            "imdbRating": 9.5,
            "imdbVotes": 2100000
        }))
        .unwrap();

        assert!(title.title_type.is_series());
        assert_eq!(title.imdb_rating, Some(9.5));
        assert_eq!(title.imdb_votes, Some(2_100_000));
    }

    #[test]
    fn test_title_not_available_fields() {
        let title: Title = serde_json::from_value(json!({
            "imdbID": "tt9999999",
            "Type": "miniseries",
            "imdbRating": "N/A",
            "imdbVotes": "N/A"
        }))
        .unwrap();

        assert_eq!(title.title_type, TitleType::Other);
        assert_eq!(title.imdb_rating, None);
        assert_eq!(title.imdb_votes, None);
    }

    #[test]
    fn test_rating_out_of_range_is_dropped() {
        let title: Title = serde_json::from_value(json!({
            "imdbID": "tt0000001",
            "imdbRating": "88",
            "imdbVotes": "-3"
        }))
        .unwrap();

        assert_eq!(title.imdb_rating, None);
        assert_eq!(title.imdb_votes, None);
    }
}
