use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameter carrying a comma separated id list, e.g. `?ids=1,2,3`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct IdListQuery {
    pub ids: String,
}

impl IdListQuery {
    pub fn parse(&self) -> Result<Vec<i64>, String> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|_| format!("Invalid id '{part}'"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        let query = IdListQuery {
            ids: "1,2, 3".to_string(),
        };
        assert_eq!(query.parse().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let query = IdListQuery {
            ids: "1,foo".to_string(),
        };
        assert!(query.parse().is_err());
    }

    #[test]
    fn skips_empty_segments() {
        let query = IdListQuery {
            ids: "1,,2,".to_string(),
        };
        assert_eq!(query.parse().unwrap(), vec![1, 2]);
    }
}
