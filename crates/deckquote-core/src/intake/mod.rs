//! Turn estimator form fields into a [`ProjectSpec`].
//!
//! Field names match the estimator page: `length`, `width`, `height`,
//! `stairWidth`, `stairRailCount`, `material`, `railMaterial`, `railInfill`,
//! `hasDemo`, `hasFascia`, `hasStairFascia`, `hasStairTK`, `desc`, and for
//! the quick deck form `finish` and `hasStairs`.

pub mod finish;
pub mod values;

use crate::error::QuoteError;
use crate::model::ProjectSpec;
use crate::pricing::engine::{HEIGHT_MESSAGE, LENGTH_MESSAGE, WIDTH_MESSAGE};
use finish::FinishLevel;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use values::{parse_checkbox, parse_count, parse_number};

/// Raw form fields keyed by input name.
pub type FormFields = BTreeMap<String, String>;

/// Build a project from form fields.
///
/// Length and width must be positive and height non-negative; those are the
/// only fields that reject the form. Stair width and stair rail count fall
/// back to 0 when missing or invalid. A `finish` level overrides the
/// material and add-on fields.
pub fn parse_form(fields: &FormFields) -> Result<ProjectSpec, QuoteError> {
    let length = parse_number(field(fields, "length"))
        .filter(|v| *v > Decimal::ZERO)
        .ok_or_else(|| QuoteError::InvalidDimension(LENGTH_MESSAGE.into()))?;
    let width = parse_number(field(fields, "width"))
        .filter(|v| *v > Decimal::ZERO)
        .ok_or_else(|| QuoteError::InvalidDimension(WIDTH_MESSAGE.into()))?;
    let height = parse_number(field(fields, "height"))
        .filter(|v| *v >= Decimal::ZERO)
        .ok_or_else(|| QuoteError::InvalidDimension(HEIGHT_MESSAGE.into()))?;

    let stair_width = parse_number(field(fields, "stairWidth"))
        .filter(|v| *v >= Decimal::ZERO)
        .unwrap_or(Decimal::ZERO);

    let description = field(fields, "desc").trim();

    let mut spec = ProjectSpec {
        description: (!description.is_empty()).then(|| description.to_string()),
        length,
        width,
        height,
        material: field(fields, "material").to_string(),
        rail_material: field(fields, "railMaterial").to_string(),
        rail_infill: field(fields, "railInfill").to_string(),
        stair_width,
        stair_rail_count: parse_count(field(fields, "stairRailCount")),
        has_demo: parse_checkbox(field(fields, "hasDemo")),
        has_fascia: parse_checkbox(field(fields, "hasFascia")),
        has_stair_fascia: parse_checkbox(field(fields, "hasStairFascia")),
        has_stair_toe_kick: parse_checkbox(field(fields, "hasStairTK")),
    };

    let finish = field(fields, "finish");
    if !finish.is_empty() {
        let level = FinishLevel::from_form(finish)?;
        level.apply(&mut spec, parse_checkbox(field(fields, "hasStairs")));
    }

    Ok(spec)
}

/// Parse `key=value` pairs, as typed on a command line.
pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<FormFields, QuoteError> {
    let mut fields = FormFields::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            QuoteError::InvalidField(format!("expected key=value, got '{}'", pair))
        })?;
        fields.insert(key.trim().to_string(), value.to_string());
    }
    Ok(fields)
}

fn field<'a>(fields: &'a FormFields, name: &str) -> &'a str {
    fields.get(name).map(|s| s.as_str()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_full_form() {
        let spec = parse_form(&form(&[
            ("length", "20"),
            ("width", "12"),
            ("height", "3"),
            ("material", "cedar"),
            ("railMaterial", "wood"),
            ("railInfill", "glass"),
            ("stairWidth", "4"),
            ("stairRailCount", "2"),
            ("hasDemo", "on"),
            ("hasStairTK", "on"),
            ("desc", " Back yard "),
        ]))
        .unwrap();
        assert_eq!(spec.length, dec!(20));
        assert_eq!(spec.stair_width, dec!(4));
        assert_eq!(spec.stair_rail_count, 2);
        assert!(spec.has_demo);
        assert!(!spec.has_fascia);
        assert!(spec.has_stair_toe_kick);
        assert_eq!(spec.description.as_deref(), Some("Back yard"));
    }

    #[test]
    fn test_dimension_messages() {
        let err = parse_form(&form(&[("length", "0"), ("width", "12"), ("height", "3")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Deck Length must be a positive number");

        let err = parse_form(&form(&[("length", "20"), ("width", "abc"), ("height", "3")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Deck Width must be a positive number");

        let err = parse_form(&form(&[("length", "20"), ("width", "12")])).unwrap_err();
        assert_eq!(err.to_string(), "Deck Height must be a non-negative number");
    }

    #[test]
    fn test_bad_stair_fields_default_to_zero() {
        let spec = parse_form(&form(&[
            ("length", "20"),
            ("width", "12"),
            ("height", "0"),
            ("stairWidth", "-3"),
            ("stairRailCount", "lots"),
        ]))
        .unwrap();
        assert_eq!(spec.stair_width, Decimal::ZERO);
        assert_eq!(spec.stair_rail_count, 0);
    }

    #[test]
    fn test_finish_overrides_choices() {
        let spec = parse_form(&form(&[
            ("length", "16"),
            ("width", "12"),
            ("height", "6"),
            ("material", "cedar"),
            ("finish", "3"),
            ("hasStairs", "on"),
        ]))
        .unwrap();
        assert_eq!(spec.material, "timberTechPrime");
        assert_eq!(spec.rail_material, "aluminum");
        assert_eq!(spec.stair_width, dec!(3.5));
    }

    #[test]
    fn test_unknown_finish_rejected() {
        let err = parse_form(&form(&[
            ("length", "16"),
            ("width", "12"),
            ("height", "6"),
            ("finish", "9"),
        ]))
        .unwrap_err();
        assert!(matches!(err, QuoteError::UnknownFinish(_)));
    }

    #[test]
    fn test_parse_pairs() {
        let fields = parse_pairs(&["length=20", "desc=a=b"]).unwrap();
        assert_eq!(fields["length"], "20");
        assert_eq!(fields["desc"], "a=b");
        assert!(parse_pairs(&["length"]).is_err());
    }
}
