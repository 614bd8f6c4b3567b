//! Country catalog queries.

use log::debug;

use super::CountryStore;
use crate::database::models::{Country, NewCountry};
use crate::errors::CatalogError;

/// All countries sorted by name
pub fn alphabetical<S: CountryStore + ?Sized>(store: &S) -> Result<Vec<Country>, CatalogError> {
    store.countries_by_name()
}

/// The country whose alpha-3 code is exactly `alpha3`
pub fn get_by_natural_key<S: CountryStore + ?Sized>(
    store: &S,
    alpha3: &str,
) -> Result<Country, CatalogError> {
    let mut matches = store.countries_with_alpha3(alpha3)?;
    match matches.len() {
        0 => Err(CatalogError::NotFound {
            entity: Country::ENTITY,
            key: alpha3.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        count => Err(CatalogError::MultipleFound {
            entity: Country::ENTITY,
            key: alpha3.to_string(),
            count,
        }),
    }
}

/// Persist a new country
pub fn create<S: CountryStore + ?Sized>(
    store: &S,
    country: &NewCountry,
) -> Result<Country, CatalogError> {
    let created = store.insert_country(country)?;
    debug!("Created country {} ({})", created.alpha3, created.slug);
    Ok(created)
}

/// Number of countries
pub fn count<S: CountryStore + ?Sized>(store: &S) -> Result<usize, CatalogError> {
    store.country_count()
}
