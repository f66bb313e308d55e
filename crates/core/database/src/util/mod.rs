pub mod id;
pub mod iso_bson_chrono;
pub mod pagination;
pub mod token;

#[cfg(test)]
pub mod test_fixtures;
