use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Department {
    Cardiology,
    Dermatology,
    Emergency,
    #[serde(rename = "General Medicine")]
    GeneralMedicine,
    Neurology,
    Orthopedics,
    Pediatrics,
    Radiology,
}

impl Department {
    /// Fixed list order. Resolution walks it front to back, so the order
    /// is the tie-break.
    pub const ALL: [Department; 8] = [
        Department::Cardiology,
        Department::Dermatology,
        Department::Emergency,
        Department::GeneralMedicine,
        Department::Neurology,
        Department::Orthopedics,
        Department::Pediatrics,
        Department::Radiology,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Department::Cardiology => "Cardiology",
            Department::Dermatology => "Dermatology",
            Department::Emergency => "Emergency",
            Department::GeneralMedicine => "General Medicine",
            Department::Neurology => "Neurology",
            Department::Orthopedics => "Orthopedics",
            Department::Pediatrics => "Pediatrics",
            Department::Radiology => "Radiology",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Appointment data gathered so far in the current booking cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub patient_name: Option<String>,
    pub patient_age: Option<String>,
    pub doctor_name: Option<String>,
    pub department: Option<Department>,
    pub preferred_date_time: Option<String>,
    pub symptoms: Option<String>,
}

impl AppointmentRecord {
    pub fn is_empty(&self) -> bool {
        *self == AppointmentRecord::default()
    }

    pub fn complete(&self) -> Option<CompleteAppointment> {
        Some(CompleteAppointment {
            patient_name: self.patient_name.clone()?,
            patient_age: self.patient_age.clone()?,
            doctor_name: self.doctor_name.clone()?,
            department: self.department?,
            preferred_date_time: self.preferred_date_time.clone()?,
            symptoms: self.symptoms.clone()?,
        })
    }
}

/// A record with every field filled in, ready to hand to the booking system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAppointment {
    pub patient_name: String,
    pub patient_age: String,
    pub doctor_name: String,
    pub department: Department,
    pub preferred_date_time: String,
    pub symptoms: String,
}
