//! Sub-district name resolution.
//!
//! [`ResolverIndex`] maps normalized lookup keys to catalogue records. Keys
//! are lowercase and trimmed, either a bare name (`"boda"`) or a name with
//! its district (`"boda|panchagarh"`).
//!
//! ## Key registration order
//!
//! Every key maps to exactly one record and the first registration wins.
//! Records are registered in catalogue order, each with its `name|district`
//! key, its bare name, and its suffix-stripped variants. Alias keys from the
//! name tables are registered only after every record, so an alias can never
//! shadow a real sub-district name.
//!
//! ## Lookup order
//!
//! A query is normalized, rewritten through the normalization table, and
//! then tried against the candidates from [`candidate_keys`] in order.

use std::collections::BTreeMap;

use constituency_map_boundary_models::NameTables;

use crate::catalogue::SubdistrictRecord;

const SADAR: &str = "sadar";
const SADAR_SUFFIX: &str = " sadar";
const KOTWALI_SUFFIX: &str = " (kotwali)";
const CITY_CORPORATION: &str = "city corporation";
const CITY_CORPORATION_SUFFIX: &str = " city corporation";

/// Lowercases and trims a name for use as (part of) a lookup key.
#[must_use]
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Builds the district-qualified key for `name`.
fn district_key(name: &str, district: &str) -> String {
    format!("{name}|{district}")
}

/// Read-only lookup from normalized names to catalogue records.
#[derive(Debug, Clone)]
pub struct ResolverIndex {
    records: Vec<SubdistrictRecord>,
    keys: BTreeMap<String, usize>,
    normalize: BTreeMap<String, String>,
}

impl ResolverIndex {
    /// Builds the index over `records`, taking ownership of them.
    ///
    /// Each record's catalogue position is set to its index in `records`.
    #[must_use]
    pub fn build(mut records: Vec<SubdistrictRecord>, tables: &NameTables) -> Self {
        for (id, record) in records.iter_mut().enumerate() {
            record.set_id(id);
        }

        let mut index = Self {
            records,
            keys: BTreeMap::new(),
            normalize: tables
                .normalize
                .iter()
                .map(|(from, to)| (normalize_key(from), normalize_key(to)))
                .collect(),
        };

        let names: Vec<(String, String)> = index
            .records
            .iter()
            .map(|record| (normalize_key(&record.name), normalize_key(&record.district)))
            .collect();

        for (id, (name, district)) in names.into_iter().enumerate() {
            index.register(district_key(&name, &district), id);
            index.register(name.clone(), id);

            if name.contains(SADAR) {
                let base = name.replace(SADAR_SUFFIX, "").replace(KOTWALI_SUFFIX, "");
                index.register(base, id);
            }

            if name.contains(CITY_CORPORATION) {
                index.register(name.replace(CITY_CORPORATION_SUFFIX, ""), id);
            }
        }

        let primary_keys = index.keys.len();

        for (alias, canonical) in &tables.aliases {
            let canonical = normalize_key(canonical);
            let Some(&id) = index.keys.get(&canonical) else {
                log::debug!("Alias target '{canonical}' for '{alias}' is not in the catalogue");
                continue;
            };
            index.register(normalize_key(alias), id);
        }

        log::info!(
            "Index contains {} entries ({} from aliases) over {} sub-districts",
            index.keys.len(),
            index.keys.len() - primary_keys,
            index.records.len()
        );

        index
    }

    /// Registers `key` for record `id` unless the key is already taken.
    fn register(&mut self, key: String, id: usize) {
        self.keys.entry(key).or_insert(id);
    }

    /// Resolves a sub-district name in the context of `district`.
    ///
    /// Returns `None` when no lookup candidate matches.
    #[must_use]
    pub fn resolve(&self, name: &str, district: &str) -> Option<&SubdistrictRecord> {
        let query = self.normalize_query(name);
        let district = normalize_key(district);

        let (key, id) = candidate_keys(&query, &district)
            .into_iter()
            .find_map(|key| self.keys.get(&key).map(|&id| (key, id)))?;

        log::debug!("Resolved '{name}' ({district}) via key '{key}'");
        self.records.get(id)
    }

    /// Normalizes a queried name and applies the normalization table.
    #[must_use]
    pub fn normalize_query(&self, name: &str) -> String {
        let name = normalize_key(name);
        self.normalize.get(&name).cloned().unwrap_or(name)
    }

    /// Looks up a single exact key, without normalization or heuristics.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SubdistrictRecord> {
        self.keys.get(key).and_then(|&id| self.records.get(id))
    }

    /// All catalogue records, in catalogue order.
    #[must_use]
    pub fn records(&self) -> &[SubdistrictRecord] {
        &self.records
    }

    /// Number of lookup keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the index has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Returns the lookup keys tried for an already-normalized `name` within
/// `district`, in priority order.
///
/// 1. `name|district`
/// 2. `name`
/// 3. for city corporations: `base city corporation`, then `base`
/// 4. without "sadar": `name sadar`, then `name sadar|district`
/// 5. with "sadar": the name with " sadar" removed
#[must_use]
pub fn candidate_keys(name: &str, district: &str) -> Vec<String> {
    let mut keys = vec![district_key(name, district), name.to_string()];

    if name.contains(CITY_CORPORATION) {
        let base = name.replace(CITY_CORPORATION_SUFFIX, "");
        keys.push(format!("{base}{CITY_CORPORATION_SUFFIX}"));
        keys.push(base);
    }

    if name.contains(SADAR) {
        keys.push(name.replace(SADAR_SUFFIX, ""));
    } else {
        let sadar = format!("{name}{SADAR_SUFFIX}");
        let sadar_in_district = district_key(&sadar, district);
        keys.push(sadar);
        keys.push(sadar_in_district);
    }

    keys
}

#[cfg(test)]
mod tests {
    use geo::{MultiPolygon, Rect, coord};

    use super::*;

    fn square(x: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![
            Rect::new(coord! { x: x, y: 0.0 }, coord! { x: x + 1.0, y: 1.0 }).to_polygon(),
        ])
    }

    fn record(name: &str, district: &str) -> SubdistrictRecord {
        SubdistrictRecord::new(name, district, square(0.0))
    }

    fn catalogue() -> Vec<SubdistrictRecord> {
        vec![
            record("Tentulia", "Panchagarh"),
            record("Panchagarh Sadar", "Panchagarh"),
            record("Kotwali", "Chattogram"),
            record("Mymensingh Sadar", "Mymensingh"),
            record("Dhaka", "Dhaka"),
            record("Gazipur City Corporation", "Gazipur"),
            record("Comilla Adarsha Sadar", "Cumilla"),
            record("Kotwali", "Dhaka"),
            record("Jessore Sadar (Kotwali)", "Jashore"),
        ]
    }

    fn tables() -> NameTables {
        NameTables {
            aliases: BTreeMap::from([
                ("tetulia".to_string(), "tentulia".to_string()),
                ("dhaka city corporation".to_string(), "dhaka".to_string()),
                ("nowhere".to_string(), "missing".to_string()),
            ]),
            normalize: BTreeMap::from([(
                "sadar dakshin".to_string(),
                "comilla adarsha sadar".to_string(),
            )]),
        }
    }

    #[test]
    fn every_record_resolves_by_name_and_district() {
        let index = ResolverIndex::build(catalogue(), &tables());

        for record in index.records() {
            let resolved = index.resolve(&record.name, &record.district).unwrap();
            assert_eq!(resolved.id(), record.id(), "{} did not resolve", record.name);
        }
    }

    #[test]
    fn bare_name_resolves_to_first_record_with_that_name() {
        let index = ResolverIndex::build(catalogue(), &tables());

        let first = index.resolve("Tentulia", "Unknown District").unwrap();
        assert_eq!(first.name, "Tentulia");

        // Two "Kotwali" records: the bare key belongs to the first one.
        let kotwali = index.resolve("Kotwali", "Unknown District").unwrap();
        assert_eq!(kotwali.district, "Chattogram");

        // The district-qualified key still reaches the second one.
        let dhaka_kotwali = index.resolve("Kotwali", "Dhaka").unwrap();
        assert_eq!(dhaka_kotwali.district, "Dhaka");
    }

    #[test]
    fn alias_resolves_to_same_record_as_canonical() {
        let index = ResolverIndex::build(catalogue(), &tables());

        for (alias, canonical) in &tables().aliases {
            let Some(expected) = index.get(canonical) else {
                continue;
            };
            let via_alias = index.resolve(alias, "").unwrap();
            let via_alias_upper = index.resolve(&alias.to_uppercase(), "").unwrap();
            assert_eq!(via_alias.id(), expected.id(), "alias {alias}");
            assert_eq!(via_alias_upper.id(), expected.id(), "alias {alias}");
        }
    }

    #[test]
    fn alias_never_shadows_primary_name() {
        let tables = NameTables {
            aliases: BTreeMap::from([("kotwali".to_string(), "dhaka".to_string())]),
            normalize: BTreeMap::new(),
        };
        let index = ResolverIndex::build(catalogue(), &tables);

        // "kotwali" is aliased to "dhaka", but a real "Kotwali" exists.
        let kotwali = index.get("kotwali").unwrap();
        assert_eq!(kotwali.name, "Kotwali");
    }

    #[test]
    fn alias_with_missing_target_is_skipped() {
        let index = ResolverIndex::build(catalogue(), &tables());
        assert!(index.get("nowhere").is_none());
        assert!(index.resolve("Nowhere", "Dhaka").is_none());
    }

    #[test]
    fn applies_normalization_table_before_lookup() {
        let index = ResolverIndex::build(catalogue(), &tables());

        let resolved = index.resolve("  Sadar Dakshin ", "Cumilla").unwrap();
        assert_eq!(resolved.name, "Comilla Adarsha Sadar");
    }

    #[test]
    fn resolves_sadar_suffix_against_bare_catalogue_name() {
        let index =
            ResolverIndex::build(vec![record("Boda", "Panchagarh")], &NameTables::default());

        let resolved = index.resolve("Boda Sadar", "Panchagarh").unwrap();
        assert_eq!(resolved.name, "Boda");
    }

    #[test]
    fn resolves_bare_name_against_sadar_catalogue_name() {
        let index = ResolverIndex::build(catalogue(), &tables());

        let resolved = index.resolve("Panchagarh", "Panchagarh").unwrap();
        assert_eq!(resolved.name, "Panchagarh Sadar");
    }

    #[test]
    fn registers_name_without_kotwali_suffix() {
        let index = ResolverIndex::build(catalogue(), &tables());

        let resolved = index.resolve("Jessore", "Jashore").unwrap();
        assert_eq!(resolved.name, "Jessore Sadar (Kotwali)");
    }

    #[test]
    fn resolves_bare_name_against_city_corporation() {
        let index = ResolverIndex::build(
            vec![record("Narayanganj City Corporation", "Narayanganj")],
            &NameTables::default(),
        );

        let resolved = index.resolve("Narayanganj", "Narayanganj").unwrap();
        assert_eq!(resolved.name, "Narayanganj City Corporation");
    }

    #[test]
    fn resolves_city_corporation_against_bare_name() {
        let index = ResolverIndex::build(vec![record("Sylhet", "Sylhet")], &NameTables::default());

        let resolved = index.resolve("Sylhet City Corporation", "Sylhet").unwrap();
        assert_eq!(resolved.name, "Sylhet");
    }

    #[test]
    fn unknown_name_does_not_resolve() {
        let index = ResolverIndex::build(catalogue(), &tables());
        assert!(index.resolve("Atlantis", "Dhaka").is_none());
    }

    #[test]
    fn first_writer_wins_on_colliding_keys() {
        // "Gazipur City Corporation" registers "gazipur"; a later record
        // named "Gazipur" keeps only its district-qualified key.
        let mut records = catalogue();
        records.push(record("Gazipur", "Gazipur Hill"));
        let index = ResolverIndex::build(records, &tables());

        assert_eq!(index.get("gazipur").unwrap().name, "Gazipur City Corporation");
        assert_eq!(
            index.get("gazipur|gazipur hill").unwrap().district,
            "Gazipur Hill"
        );
    }

    #[test]
    fn candidate_order_for_plain_name() {
        assert_eq!(
            candidate_keys("boda", "panchagarh"),
            vec![
                "boda|panchagarh",
                "boda",
                "boda sadar",
                "boda sadar|panchagarh",
            ]
        );
    }

    #[test]
    fn candidate_order_for_sadar_name() {
        assert_eq!(
            candidate_keys("panchagarh sadar", "panchagarh"),
            vec![
                "panchagarh sadar|panchagarh",
                "panchagarh sadar",
                "panchagarh",
            ]
        );
    }

    #[test]
    fn candidate_order_for_city_corporation() {
        assert_eq!(
            candidate_keys("khulna city corporation", "khulna"),
            vec![
                "khulna city corporation|khulna",
                "khulna city corporation",
                "khulna city corporation",
                "khulna",
                "khulna city corporation sadar",
                "khulna city corporation sadar|khulna",
            ]
        );
    }
}
