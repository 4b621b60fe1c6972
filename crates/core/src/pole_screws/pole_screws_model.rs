use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PoleScrew {
    pub id: String,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub length_mm: i32,
    pub unit_price: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPoleScrew {
    pub id: Option<String>,
    pub company_id: String,
    pub code: String,
    pub description: String,
    pub length_mm: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoleScrewUpdate {
    pub id: String,
    pub code: String,
    pub description: String,
    pub length_mm: i32,
    pub unit_price: Decimal,
}

/// Picks the shortest screw at least `min_length_mm` long.
///
/// Ties on length go to the cheaper screw, then to the lower code, so the
/// choice does not depend on input order.
pub fn select_pole_screw(screws: &[PoleScrew], min_length_mm: i32) -> Option<&PoleScrew> {
    screws
        .iter()
        .filter(|s| s.length_mm >= min_length_mm)
        .min_by(|a, b| {
            a.length_mm
                .cmp(&b.length_mm)
                .then_with(|| a.unit_price.cmp(&b.unit_price))
                .then_with(|| a.code.cmp(&b.code))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn screw(code: &str, length_mm: i32, price: Decimal) -> PoleScrew {
        PoleScrew {
            id: code.to_lowercase(),
            company_id: "c1".to_string(),
            code: code.to_string(),
            description: format!("Screw {}", length_mm),
            length_mm,
            unit_price: price,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn test_select_shortest_screw_that_fits() {
        let screws = vec![
            screw("PS-400", 400, dec!(12)),
            screw("PS-250", 250, dec!(8)),
            screw("PS-300", 300, dec!(9)),
        ];
        assert_eq!(select_pole_screw(&screws, 260).unwrap().code, "PS-300");
        assert_eq!(select_pole_screw(&screws, 250).unwrap().code, "PS-250");
        assert!(select_pole_screw(&screws, 401).is_none());
    }

    #[test]
    fn test_select_breaks_ties_by_price_then_code() {
        let screws = vec![
            screw("PS-B", 300, dec!(9)),
            screw("PS-C", 300, dec!(7)),
            screw("PS-A", 300, dec!(7)),
        ];
        assert_eq!(select_pole_screw(&screws, 300).unwrap().code, "PS-A");
    }

    #[test]
    fn test_select_from_empty_catalog() {
        assert!(select_pole_screw(&[], 100).is_none());
    }
}
