//! Claves de consulta y aristas de invalidación
//!
//! Cada mutación declara qué claves deja obsoletas; la cache aplica la tabla
//! tras una mutación exitosa.

use std::fmt;

use crate::models::CatalogResource;

/// Familia de consultas; junto con el scope forma la clave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryFamily {
    AllFleetAppointments,
    SingleFleetAppointment,
    AppointmentsByVehicle,
    UpcomingFleetAppointments,
    SupportRequests,
    Appointments,
    SingleAppointment,
    FleetNews,
    Deals,
    SingleDeal,
    Tires,
    SingleTire,
    Blogs,
    Users,
    Catalog(CatalogResource),
}

impl QueryFamily {
    pub fn name(&self) -> String {
        match self {
            QueryFamily::AllFleetAppointments => "GET_ALL_FLEET_APPOINTMENTS".to_string(),
            QueryFamily::SingleFleetAppointment => "GET_SINGLE_FLEET_APPOINTMENT".to_string(),
            QueryFamily::AppointmentsByVehicle => "GET_APPOINTMENTS_BY_VEHICLE".to_string(),
            QueryFamily::UpcomingFleetAppointments => "GET_UPCOMING_FLEET_APPOINTMENTS".to_string(),
            QueryFamily::SupportRequests => "GET_ALL_SUPPORT_REQUESTS".to_string(),
            QueryFamily::Appointments => "GET_APPOINTMENT".to_string(),
            QueryFamily::SingleAppointment => "GET_SINGLE_APPOINTMENT".to_string(),
            QueryFamily::FleetNews => "GET_ALL_FLEET_NEWS".to_string(),
            QueryFamily::Deals => "GET_ALL_DEALS".to_string(),
            QueryFamily::SingleDeal => "GET_SINGLE_DEAL".to_string(),
            QueryFamily::Tires => "GET_TIRES".to_string(),
            QueryFamily::SingleTire => "GET_SINGLE_TIRE".to_string(),
            QueryFamily::Blogs => "GET_BLOGS".to_string(),
            QueryFamily::Users => "GET_USERS".to_string(),
            QueryFamily::Catalog(resource) => {
                format!("GET_{}", resource.name().replace('-', "_").to_uppercase())
            }
        }
    }
}

/// Clave de cache: familia + scope (id o parámetros serializados)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    pub family: QueryFamily,
    pub scope: String,
}

impl QueryKey {
    pub fn new(family: QueryFamily, scope: impl Into<String>) -> Self {
        Self {
            family,
            scope: scope.into(),
        }
    }

    /// Clave sin scope
    pub fn of(family: QueryFamily) -> Self {
        Self::new(family, "")
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_empty() {
            f.write_str(&self.family.name())
        } else {
            write!(f, "{}:{}", self.family.name(), self.scope)
        }
    }
}

/// Objetivo de una invalidación
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidation {
    /// Todas las claves de la familia, cualquiera sea su scope
    Family(QueryFamily),
    /// Una clave exacta
    Key(QueryKey),
}

impl Invalidation {
    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            Invalidation::Family(family) => key.family == *family,
            Invalidation::Key(exact) => key == exact,
        }
    }
}

/// Mutaciones que disparan invalidaciones
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateFleetAppointment,
    UpdateFleetAppointment { id: String },
    UpdateAppointmentStatus { id: String },
    DeleteFleetAppointment { id: String },
    AssignFleetRef { id: String },
    CreateAppointment,
    UpdateAppointment { id: String },
    DeleteAppointment { id: String },
    CreateFleetNews,
    UpdateFleetNews { id: String },
    DeleteFleetNews { id: String },
    CreateTire,
    UpdateTire { id: String },
    DeleteTire { id: String },
    CreateBlog,
    DeleteBlog { id: String },
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::CreateFleetAppointment => "CREATE_FLEET_APPOINTMENT",
            Mutation::UpdateFleetAppointment { .. } => "UPDATE_FLEET_APPOINTMENT",
            Mutation::UpdateAppointmentStatus { .. } => "UPDATE_APPOINTMENT_STATUS",
            Mutation::DeleteFleetAppointment { .. } => "DELETE_FLEET_APPOINTMENT",
            Mutation::AssignFleetRef { .. } => "ASSIGN_FLEET_REF",
            Mutation::CreateAppointment => "CREATE_APPOINTMENT",
            Mutation::UpdateAppointment { .. } => "UPDATE_APPOINTMENT",
            Mutation::DeleteAppointment { .. } => "DELETE_APPOINTMENT",
            Mutation::CreateFleetNews => "CREATE_FLEET_NEWS",
            Mutation::UpdateFleetNews { .. } => "UPDATE_FLEET_NEWS",
            Mutation::DeleteFleetNews { .. } => "DELETE_FLEET_NEWS",
            Mutation::CreateTire => "CREATE_TIRE",
            Mutation::UpdateTire { .. } => "UPDATE_TIRE",
            Mutation::DeleteTire { .. } => "DELETE_TIRE",
            Mutation::CreateBlog => "CREATE_BLOG",
            Mutation::DeleteBlog { .. } => "DELETE_BLOG",
        }
    }

    /// Tabla de aristas mutación -> claves
    pub fn invalidations(&self) -> Vec<Invalidation> {
        use Invalidation::{Family, Key};
        use QueryFamily::*;

        let single = |id: &str| Key(QueryKey::new(SingleFleetAppointment, id));

        match self {
            Mutation::CreateFleetAppointment => vec![
                Family(AllFleetAppointments),
                Family(UpcomingFleetAppointments),
                Family(SupportRequests),
                Family(AppointmentsByVehicle),
            ],
            Mutation::UpdateFleetAppointment { id }
            | Mutation::UpdateAppointmentStatus { id }
            | Mutation::DeleteFleetAppointment { id } => vec![
                Family(AllFleetAppointments),
                single(id.as_str()),
                Family(UpcomingFleetAppointments),
                Family(SupportRequests),
                Family(AppointmentsByVehicle),
            ],
            Mutation::AssignFleetRef { id } => vec![
                Family(SupportRequests),
                single(id.as_str()),
                Family(AllFleetAppointments),
            ],
            Mutation::CreateAppointment => vec![Family(Appointments)],
            Mutation::UpdateAppointment { id } | Mutation::DeleteAppointment { id } => vec![
                Family(Appointments),
                Key(QueryKey::new(SingleAppointment, id.as_str())),
            ],
            Mutation::CreateFleetNews
            | Mutation::UpdateFleetNews { .. }
            | Mutation::DeleteFleetNews { .. } => vec![Family(FleetNews)],
            Mutation::CreateTire => vec![Family(Tires)],
            Mutation::UpdateTire { id } | Mutation::DeleteTire { id } => vec![
                Family(Tires),
                Key(QueryKey::new(SingleTire, id.as_str())),
            ],
            Mutation::CreateBlog | Mutation::DeleteBlog { .. } => vec![Family(Blogs)],
        }
    }
}
