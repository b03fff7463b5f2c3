//! Solicitudes de soporte de flota
//!
//! Una solicitud de soporte es la misma cita de flota vista desde la cola de
//! asignación. Su estado ("Assigned" / "Not Assigned") se calcula a partir de
//! la presencia de `fleetRef` y nunca se persiste.

use std::fmt;

use super::fleet_appointment::{FleetAppointment, FleetRef};

/// Estado derivado para la cola de soporte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportStatus {
    Assigned,
    NotAssigned,
}

impl SupportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportStatus::Assigned => "Assigned",
            SupportStatus::NotAssigned => "Not Assigned",
        }
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Cita vista a través de la cola de soporte
#[derive(Debug, Clone, PartialEq)]
pub struct SupportRequest {
    appointment: FleetAppointment,
}

impl SupportRequest {
    pub fn id(&self) -> &str {
        &self.appointment.id
    }

    pub fn appointment(&self) -> &FleetAppointment {
        &self.appointment
    }

    pub fn fleet_ref(&self) -> Option<&FleetRef> {
        self.appointment.fleet_ref.as_ref()
    }

    pub fn status(&self) -> SupportStatus {
        if self.appointment.fleet_ref.is_some() {
            SupportStatus::Assigned
        } else {
            SupportStatus::NotAssigned
        }
    }

    pub fn into_appointment(self) -> FleetAppointment {
        self.appointment
    }
}

impl From<FleetAppointment> for SupportRequest {
    fn from(appointment: FleetAppointment) -> Self {
        Self { appointment }
    }
}
