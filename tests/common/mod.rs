use gridiron_stats::model::table::StatsTable;

pub const FULL_FIXTURE: &str = include_str!("../fixtures/statstable.csv");

#[must_use]
pub fn fixture_table() -> StatsTable {
    StatsTable::from_reader(FULL_FIXTURE.as_bytes()).expect("fixture stats table parses")
}
