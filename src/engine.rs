// The listing pipeline: pure filtering, searching and sorting over the
// vehicle catalogue. No state, no I/O; callers publish the resulting
// count back to the filter store themselves.

use crate::models::{Filters, SortOption, Vehicle};
use std::cmp::Ordering;

// Fields the free-text search looks at, lower-cased, substring match.
fn searchable_fields(vehicle: &Vehicle) -> Vec<String> {
    let mut fields = vec![
        vehicle.make.to_lowercase(),
        vehicle.model.to_lowercase(),
        vehicle.price.to_string(),
    ];
    if let Some(year) = vehicle.year {
        fields.push(year.to_string());
    }
    if let Some(ref variant) = vehicle.variant {
        fields.push(variant.to_lowercase());
    }
    if let Some(ref fuel) = vehicle.fuel_type {
        fields.push(fuel.to_lowercase());
    }
    fields
}

fn matches_search(vehicle: &Vehicle, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    searchable_fields(vehicle)
        .iter()
        .any(|field| field.contains(&query))
}

// Named year buckets used by the sidebar: "2020-Present", "Before 2005",
// or an inclusive "YYYY-YYYY" range. Unparseable ranges match nothing.
fn year_in_range(year: u32, range: &str) -> bool {
    if range == "2020-Present" {
        return year >= 2020;
    }
    if range == "Before 2005" {
        return year < 2005;
    }
    let mut parts = range.splitn(2, '-');
    match (
        parts.next().and_then(|s| s.parse::<u32>().ok()),
        parts.next().and_then(|s| s.parse::<u32>().ok()),
    ) {
        (Some(start), Some(end)) => year >= start && year <= end,
        _ => false,
    }
}

// Membership test for one multi-valued dimension. An empty selection
// passes everything; a vehicle without the attribute also passes, so an
// incomplete record is never dropped by a dimension it cannot answer.
fn passes_membership(selected: &[String], value: Option<&str>) -> bool {
    if selected.is_empty() {
        return true;
    }
    match value {
        Some(value) => selected.iter().any(|token| token == value),
        None => true,
    }
}

fn passes_filters(vehicle: &Vehicle, filters: &Filters) -> bool {
    // Vehicle type is applied first; everything else narrows within it.
    if vehicle.vehicle_type != filters.vehicle_type {
        return false;
    }

    if !passes_membership(&filters.fuel_type, vehicle.fuel_type.as_deref()) {
        return false;
    }
    if !passes_membership(&filters.ownership, vehicle.ownership.as_deref()) {
        return false;
    }
    if !passes_membership(&filters.transmission, vehicle.transmission.as_deref()) {
        return false;
    }

    // RTO matches by prefix so a state code ("KA") matches a full
    // registration string ("KA-01 Bengaluru").
    if !filters.rto.is_empty() {
        if let Some(ref rto_state) = vehicle.rto_state {
            if !filters.rto.iter().any(|token| rto_state.starts_with(token.as_str())) {
                return false;
            }
        }
    }

    // Year matches if the vehicle falls in ANY selected bucket.
    if !filters.year.is_empty() {
        if let Some(year) = vehicle.year {
            if !filters.year.iter().any(|range| year_in_range(year, range)) {
                return false;
            }
        }
    }

    true
}

fn compare(a: &Vehicle, b: &Vehicle, sort: SortOption) -> Ordering {
    match sort {
        SortOption::PriceAsc => a.price.cmp(&b.price),
        SortOption::PriceDesc => b.price.cmp(&a.price),
        // Missing years compare as 0 so incomplete records sink to the
        // cheap end instead of panicking.
        SortOption::YearAsc => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
        SortOption::YearDesc => b.year.unwrap_or(0).cmp(&a.year.unwrap_or(0)),
        SortOption::KmsAsc => a.kms_driven.cmp(&b.kms_driven),
        SortOption::KmsDesc => b.kms_driven.cmp(&a.kms_driven),
    }
}

// The whole pipeline. Filtering is conjunctive across dimensions and
// disjunctive within one; the sort is stable, so equal keys keep their
// catalogue order. The input is never mutated and identical inputs always
// produce identical output.
pub fn filter_and_sort(
    vehicles: &[Vehicle],
    filters: &Filters,
    sort: SortOption,
    search_query: &str,
) -> Vec<Vehicle> {
    let mut result: Vec<Vehicle> = vehicles
        .iter()
        .filter(|v| passes_filters(v, filters))
        .filter(|v| matches_search(v, search_query))
        .cloned()
        .collect();
    result.sort_by(|a, b| compare(a, b, sort));
    result
}

// Result count for "showing N of M" display; just the pipeline's length.
pub fn result_count(
    vehicles: &[Vehicle],
    filters: &Filters,
    sort: SortOption,
    search_query: &str,
) -> usize {
    filter_and_sort(vehicles, filters, sort, search_query).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MultiFilterField, VehicleType};
    use std::collections::BTreeMap;

    fn vehicle(id: &str, price: u64, year: Option<u32>, fuel: &str) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            make: "Maruti Suzuki".to_string(),
            model: "Swift".to_string(),
            price,
            variant: None,
            year,
            status: Some("For Sale".to_string()),
            verified: Some(true),
            mfg_year: year,
            reg_year: year,
            reg_number: None,
            rto_state: Some("KA-01 Bengaluru".to_string()),
            ownership: Some("1st Owner".to_string()),
            kms_driven: 40_000,
            fuel_type: Some(fuel.to_string()),
            transmission: Some("Manual".to_string()),
            insurance: None,
            service_history: None,
            color: None,
            vehicle_type: VehicleType::FourWheeler,
            images: BTreeMap::new(),
        }
    }

    fn sample() -> Vec<Vehicle> {
        vec![
            vehicle("1", 500_000, Some(2018), "Petrol"),
            vehicle("2", 300_000, Some(2021), "Diesel"),
            vehicle("3", 700_000, Some(2015), "Petrol"),
        ]
    }

    #[test]
    fn petrol_filter_with_price_ascending() {
        let mut filters = Filters::default();
        filters.fuel_type.push("Petrol".to_string());

        let result = filter_and_sort(&sample(), &filters, SortOption::PriceAsc, "");
        let prices: Vec<u64> = result.iter().map(|v| v.price).collect();
        assert_eq!(prices, vec![500_000, 700_000]);
        assert_eq!(result_count(&sample(), &filters, SortOption::PriceAsc, ""), 2);
    }

    #[test]
    fn year_bucket_with_no_matches_is_empty_not_an_error() {
        let mut filters = Filters::default();
        filters.year.push("Before 2005".to_string());

        let result = filter_and_sort(&sample(), &filters, SortOption::PriceAsc, "");
        assert!(result.is_empty());
    }

    #[test]
    fn year_buckets_are_disjunctive() {
        let mut filters = Filters::default();
        filters.year.push("2020-Present".to_string());
        filters.year.push("2014-2016".to_string());

        let result = filter_and_sort(&sample(), &filters, SortOption::PriceAsc, "");
        let ids: Vec<&str> = result.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn unparseable_year_range_matches_nothing() {
        assert!(!year_in_range(2018, "garbage"));
        assert!(!year_in_range(2018, "2014-banana"));
        assert!(year_in_range(2015, "2014-2016"));
        assert!(year_in_range(2021, "2020-Present"));
        assert!(year_in_range(2004, "Before 2005"));
    }

    #[test]
    fn rto_filter_matches_by_prefix() {
        let mut filters = Filters::default();
        filters.rto.push("KA".to_string());
        assert_eq!(filter_and_sort(&sample(), &filters, SortOption::PriceAsc, "").len(), 3);

        filters.rto.clear();
        filters.rto.push("MH".to_string());
        assert!(filter_and_sort(&sample(), &filters, SortOption::PriceAsc, "").is_empty());
    }

    #[test]
    fn vehicle_type_is_applied_first() {
        let mut filters = Filters::default();
        filters.vehicle_type = VehicleType::TwoWheeler;
        // Even with a matching fuel filter, nothing of the other type passes.
        filters.fuel_type.push("Petrol".to_string());
        assert!(filter_and_sort(&sample(), &filters, SortOption::PriceAsc, "").is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filters = Filters::default();
        let result = filter_and_sort(&sample(), &filters, SortOption::PriceAsc, "SWIFT");
        assert_eq!(result.len(), 3);
        for v in &result {
            let hit = searchable_fields(v).iter().any(|f| f.contains("swift"));
            assert!(hit, "vehicle {} does not match the query", v.id);
        }

        let result = filter_and_sort(&sample(), &filters, SortOption::PriceAsc, "diesel");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "2");
    }

    #[test]
    fn search_matches_price_as_string() {
        let filters = Filters::default();
        let result = filter_and_sort(&sample(), &filters, SortOption::PriceAsc, "700000");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "3");
    }

    #[test]
    fn empty_collection_yields_empty_result() {
        let filters = Filters::default();
        assert!(filter_and_sort(&[], &filters, SortOption::PriceAsc, "").is_empty());
        assert_eq!(result_count(&[], &filters, SortOption::PriceAsc, ""), 0);
    }

    #[test]
    fn no_filters_returns_sorted_copy_of_everything() {
        let filters = Filters::default();
        let result = filter_and_sort(&sample(), &filters, SortOption::KmsDesc, "");
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn sort_orders_are_correct() {
        let filters = Filters::default();

        let by_price = filter_and_sort(&sample(), &filters, SortOption::PriceAsc, "");
        assert!(by_price.windows(2).all(|w| w[0].price <= w[1].price));

        let by_price_desc = filter_and_sort(&sample(), &filters, SortOption::PriceDesc, "");
        assert!(by_price_desc.windows(2).all(|w| w[0].price >= w[1].price));

        let by_year = filter_and_sort(&sample(), &filters, SortOption::YearAsc, "");
        let years: Vec<u32> = by_year.iter().map(|v| v.year.unwrap_or(0)).collect();
        assert_eq!(years, vec![2015, 2018, 2021]);
    }

    #[test]
    fn missing_year_sorts_as_zero() {
        let mut vehicles = sample();
        vehicles.push(vehicle("4", 100_000, None, "Petrol"));
        let filters = Filters::default();

        let by_year = filter_and_sort(&vehicles, &filters, SortOption::YearAsc, "");
        assert_eq!(by_year[0].id, "4");
    }

    #[test]
    fn engine_is_pure() {
        let vehicles = sample();
        let mut filters = Filters::default();
        filters.fuel_type.push("Petrol".to_string());

        let first = filter_and_sort(&vehicles, &filters, SortOption::PriceAsc, "sw");
        let second = filter_and_sort(&vehicles, &filters, SortOption::PriceAsc, "sw");
        let first_ids: Vec<&str> = first.iter().map(|v| v.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
        // And the source collection is untouched.
        assert_eq!(vehicles.len(), 3);
    }

    #[test]
    fn adding_a_token_never_grows_the_result() {
        let vehicles = sample();
        let mut filters = Filters::default();
        let base = result_count(&vehicles, &filters, SortOption::PriceAsc, "");

        for field in MultiFilterField::ALL {
            let mut narrowed = filters.clone();
            narrowed.field_mut(field).push("Petrol".to_string());
            let count = result_count(&vehicles, &narrowed, SortOption::PriceAsc, "");
            assert!(count <= base, "{:?} grew the result set", field);
        }

        // And narrowing an already-narrow state stays monotone too.
        filters.fuel_type.push("Petrol".to_string());
        let narrowed = result_count(&vehicles, &filters, SortOption::PriceAsc, "");
        filters.ownership.push("2nd Owner".to_string());
        let further = result_count(&vehicles, &filters, SortOption::PriceAsc, "");
        assert!(further <= narrowed);
    }

    #[test]
    fn vehicle_without_attribute_passes_that_dimension() {
        let mut incomplete = vehicle("9", 250_000, Some(2019), "Petrol");
        incomplete.fuel_type = None;
        let vehicles = vec![incomplete];

        let mut filters = Filters::default();
        filters.fuel_type.push("Diesel".to_string());
        // No fuel type recorded, so the fuel dimension cannot exclude it.
        assert_eq!(filter_and_sort(&vehicles, &filters, SortOption::PriceAsc, "").len(), 1);
    }
}
