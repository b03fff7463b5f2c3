//! Búsqueda y filtro por estado
//!
//! La búsqueda es una subcadena sin distinguir mayúsculas, en OR sobre los
//! campos que cada tabla declara. El filtro por estado compara el literal exacto.

use crate::models::{AppointmentStatus, Deal, FleetAppointment, FleetNews, SupportRequest};

/// Filas que se pueden buscar y filtrar
pub trait Searchable {
    /// Campos sobre los que corre la búsqueda
    fn search_fields(&self) -> Vec<&str>;

    /// Literal de estado para el filtro exacto, si la fila lo tiene
    fn status_key(&self) -> Option<&str> {
        None
    }
}

impl Searchable for FleetAppointment {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.fleet_vehicle.make.as_str(),
            self.fleet_vehicle.model.as_str(),
            self.fleet_vehicle.license_plate.as_str(),
            self.service_type.as_str(),
            self.address.as_str(),
        ]
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl Searchable for SupportRequest {
    fn search_fields(&self) -> Vec<&str> {
        let appointment = self.appointment();
        vec![
            appointment.service_type.as_str(),
            appointment.status.as_str(),
            appointment.fleet_vehicle.make.as_str(),
            appointment.fleet_vehicle.model.as_str(),
            appointment.fleet_vehicle.license_plate.as_str(),
        ]
    }
}

impl Searchable for FleetNews {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.badge.as_str(),
            self.status.as_str(),
        ]
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

impl Searchable for Deal {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(description) = &self.description {
            fields.push(description.as_str());
        }
        fields
    }
}

/// Filtro exacto por estado
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    pub fn status(status: AppointmentStatus) -> Self {
        StatusFilter::Only(status.as_str().to_string())
    }

    pub fn accepts<T: Searchable>(&self, item: &T) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => item.status_key() == Some(wanted.as_str()),
        }
    }
}

/// Búsqueda vacía o solo espacios acepta todo
pub fn matches_search<T: Searchable>(item: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn search<'a, T: Searchable>(items: impl IntoIterator<Item = &'a T>, term: &str) -> Vec<&'a T>
where
    T: 'a,
{
    items
        .into_iter()
        .filter(|item| matches_search(*item, term))
        .collect()
}

pub fn filter_status<'a, T: Searchable>(
    items: impl IntoIterator<Item = &'a T>,
    filter: &StatusFilter,
) -> Vec<&'a T>
where
    T: 'a,
{
    items
        .into_iter()
        .filter(|item| filter.accepts(*item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fleet_appointment::fixtures::appointment;
    use crate::models::FleetRef;

    fn sample() -> Vec<FleetAppointment> {
        vec![
            appointment("1", "Toyota", AppointmentStatus::Pending),
            appointment("2", "Honda", AppointmentStatus::Pending),
            appointment("3", "Toyota", AppointmentStatus::Completed),
            appointment("4", "Ford", AppointmentStatus::InProgress),
            appointment("5", "toyota", AppointmentStatus::Cancelled),
        ]
    }

    fn ids(items: &[&FleetAppointment]) -> Vec<String> {
        items.iter().map(|item| item.id.clone()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let items = sample();
        let found = search(&items, "toyota");
        assert_eq!(ids(&found), vec!["1", "3", "5"]);

        let found = search(&items, "  TOY ");
        assert_eq!(ids(&found), vec!["1", "3", "5"]);

        assert!(search(&items, "honda")
            .iter()
            .all(|item| item.fleet_vehicle.make == "Honda"));
    }

    #[test]
    fn test_search_covers_plate_service_and_address() {
        let items = sample();
        assert_eq!(ids(&search(&items, "plt-4")), vec!["4"]);
        assert_eq!(search(&items, "rotation").len(), items.len());
        assert_eq!(search(&items, "depot").len(), items.len());
        assert!(search(&items, "nothing like this").is_empty());
    }

    #[test]
    fn test_search_and_status_filter_commute() {
        let items = sample();
        let terms = ["", "toyota", "o", "plt-2", "zzz"];
        let mut filters = vec![StatusFilter::All];
        filters.extend(AppointmentStatus::ALL.iter().map(|s| StatusFilter::status(*s)));

        for term in terms {
            for filter in &filters {
                let searched = search(&items, term);
                let a = filter_status(searched, filter);
                let filtered = filter_status(&items, filter);
                let b = search(filtered, term);
                assert_eq!(ids(&a), ids(&b), "term={term:?} filter={filter:?}");
            }
        }
    }

    #[test]
    fn test_status_filter_uses_exact_literal() {
        let items = sample();
        let in_progress = filter_status(&items, &StatusFilter::status(AppointmentStatus::InProgress));
        assert_eq!(ids(&in_progress), vec!["4"]);

        let lowercase = filter_status(&items, &StatusFilter::Only("pending".to_string()));
        assert!(lowercase.is_empty());
    }

    #[test]
    fn test_support_search_uses_appointment_status_only() {
        let mut assigned = appointment("1", "Toyota", AppointmentStatus::Pending);
        assigned.fleet_ref = Some(FleetRef {
            phone: "+14123456789".to_string(),
            email: "ops@fleet.com".to_string(),
            note: None,
        });
        let requests: Vec<SupportRequest> = vec![
            assigned.into(),
            appointment("2", "Honda", AppointmentStatus::Confirmed).into(),
        ];

        assert!(search(&requests, "assigned").is_empty());
        assert!(search(&requests, "not").is_empty());

        let confirmed = search(&requests, "confirmed");
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id(), "2");
        assert_eq!(search(&requests, "toyota")[0].id(), "1");
        assert_eq!(search(&requests, "plt-2")[0].id(), "2");
    }
}
