// Two one-directional pipelines between the filter store and the page's
// query string. The read path (`parse_query`) runs once per page mount,
// after hydration, and feeds `FilterStore::apply_url_seed`. The write path
// (`to_query_string`) runs on every relevant state change and produces the
// canonical query string the client applies with history.replaceState.
// There is no shared mutable flag between the two beyond the store's
// hydration gate, so they cannot race.

use crate::models::{Filters, MultiFilterField, SortOption, VehicleType};
use urlencoding::{decode, encode};

// Partial state recognized in a URL. Absent keys mean "no constraint";
// unknown keys and invalid tokens are ignored rather than rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlSeed {
    pub vehicle_type: Option<VehicleType>,
    pub sort: Option<SortOption>,
    pub multi: Vec<(MultiFilterField, Vec<String>)>,
}

impl UrlSeed {
    pub fn is_empty(&self) -> bool {
        self.vehicle_type.is_none() && self.sort.is_none() && self.multi.is_empty()
    }
}

// Read path: decode a raw query string ("fuelType=Petrol%2CDiesel&sort=...")
// into a seed. Comma-separated lists, percent-decoded per token.
pub fn parse_query(query: &str) -> UrlSeed {
    let mut seed = UrlSeed::default();

    for pair in query.trim_start_matches('?').split('&') {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next().unwrap_or("");
        let raw_value = parts.next().unwrap_or("");
        if key.is_empty() || raw_value.is_empty() {
            continue;
        }

        match key {
            "sort" => {
                if let Ok(value) = decode(raw_value) {
                    seed.sort = SortOption::parse(&value);
                }
            }
            "vehicleType" => {
                if let Ok(value) = decode(raw_value) {
                    seed.vehicle_type = VehicleType::parse(&value);
                }
            }
            _ => {
                if let Some(field) = MultiFilterField::parse(key) {
                    let values: Vec<String> = raw_value
                        .split(',')
                        .filter_map(|token| decode(token).ok())
                        .map(|token| token.into_owned())
                        .filter(|token| !token.is_empty())
                        .collect();
                    if !values.is_empty() {
                        seed.multi.push((field, values));
                    }
                }
            }
        }
    }

    seed
}

// Write path: serialize the current filters and sort. Scalar keys first,
// then each non-empty multi-valued field comma-joined; empty fields are
// omitted entirely so the URL stays short and shareable.
pub fn to_query_string(filters: &Filters, sort: SortOption) -> String {
    let mut pairs: Vec<String> = Vec::new();

    pairs.push(format!("vehicleType={}", encode(filters.vehicle_type.as_str())));
    pairs.push(format!("sort={}", sort.as_str()));

    for field in MultiFilterField::ALL {
        let values = filters.field(field);
        if values.is_empty() {
            continue;
        }
        let joined: Vec<String> = values.iter().map(|v| encode(v).into_owned()).collect();
        pairs.push(format!("{}={}", field.as_str(), joined.join(",")));
    }

    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_scalars_and_non_empty_fields_only() {
        let mut filters = Filters::default();
        filters.fuel_type.push("Petrol".to_string());
        filters.fuel_type.push("Diesel".to_string());

        let query = to_query_string(&filters, SortOption::PriceAsc);
        assert_eq!(query, "vehicleType=4-wheeler&sort=price-asc&fuelType=Petrol,Diesel");
    }

    #[test]
    fn round_trip_preserves_filters_and_sort() {
        let mut filters = Filters::default();
        filters.vehicle_type = VehicleType::TwoWheeler;
        filters.fuel_type.push("Petrol".to_string());
        filters.year.push("2020-Present".to_string());
        filters.year.push("Before 2005".to_string());
        filters.rto.push("KA".to_string());
        filters.ownership.push("1st Owner".to_string());
        filters.transmission.push("Manual".to_string());
        let sort = SortOption::KmsDesc;

        let seed = parse_query(&to_query_string(&filters, sort));

        assert_eq!(seed.vehicle_type, Some(VehicleType::TwoWheeler));
        assert_eq!(seed.sort, Some(sort));

        let mut rebuilt = Filters::default();
        rebuilt.vehicle_type = seed.vehicle_type.unwrap();
        for (field, values) in &seed.multi {
            *rebuilt.field_mut(*field) = values.clone();
        }
        assert_eq!(rebuilt, filters);
    }

    #[test]
    fn tokens_with_spaces_survive_encoding() {
        let mut filters = Filters::default();
        filters.ownership.push("1st Owner".to_string());

        let query = to_query_string(&filters, SortOption::default());
        assert!(query.contains("ownership=1st%20Owner"));

        let seed = parse_query(&query);
        assert_eq!(
            seed.multi,
            vec![(MultiFilterField::Ownership, vec!["1st Owner".to_string()])]
        );
    }

    #[test]
    fn unknown_keys_and_invalid_tokens_are_inert() {
        let seed = parse_query("?page=3&sort=bogus&color=Red&fuelType=Petrol");
        assert_eq!(seed.sort, None);
        assert_eq!(seed.vehicle_type, None);
        assert_eq!(
            seed.multi,
            vec![(MultiFilterField::FuelType, vec!["Petrol".to_string()])]
        );
    }

    #[test]
    fn empty_query_parses_to_empty_seed() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("?").is_empty());
    }
}
