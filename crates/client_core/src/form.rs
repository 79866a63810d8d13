//! Raw form values and their conversion into a predict payload.

use shared::{
    domain::{FormField, NumericKind},
    error::FormError,
    protocol::PredictRequest,
};

/// Field values exactly as typed. Nothing is coerced until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pregnancies: String,
    glucose: String,
    blood_pressure: String,
    skin_thickness: String,
    insulin: String,
    bmi: String,
    diabetes_pedigree_function: String,
    age: String,
}

impl FormInputs {
    pub fn get(&self, field: FormField) -> &str {
        self.slot(field)
    }

    pub fn set(&mut self, field: FormField, raw: impl Into<String>) {
        *self.slot_mut(field) = raw.into();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    pub fn to_request(&self) -> Result<PredictRequest, FormError> {
        Ok(PredictRequest {
            pregnancies: self.integer(FormField::Pregnancies)?,
            glucose: self.decimal(FormField::Glucose)?,
            blood_pressure: self.decimal(FormField::BloodPressure)?,
            skin_thickness: self.decimal(FormField::SkinThickness)?,
            insulin: self.decimal(FormField::Insulin)?,
            bmi: self.decimal(FormField::Bmi)?,
            diabetes_pedigree_function: self.decimal(FormField::DiabetesPedigreeFunction)?,
            age: self.integer(FormField::Age)?,
        })
    }

    fn slot(&self, field: FormField) -> &String {
        match field {
            FormField::Pregnancies => &self.pregnancies,
            FormField::Glucose => &self.glucose,
            FormField::BloodPressure => &self.blood_pressure,
            FormField::SkinThickness => &self.skin_thickness,
            FormField::Insulin => &self.insulin,
            FormField::Bmi => &self.bmi,
            FormField::DiabetesPedigreeFunction => &self.diabetes_pedigree_function,
            FormField::Age => &self.age,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Pregnancies => &mut self.pregnancies,
            FormField::Glucose => &mut self.glucose,
            FormField::BloodPressure => &mut self.blood_pressure,
            FormField::SkinThickness => &mut self.skin_thickness,
            FormField::Insulin => &mut self.insulin,
            FormField::Bmi => &mut self.bmi,
            FormField::DiabetesPedigreeFunction => &mut self.diabetes_pedigree_function,
            FormField::Age => &mut self.age,
        }
    }

    fn decimal(&self, field: FormField) -> Result<f64, FormError> {
        debug_assert_eq!(field.kind(), NumericKind::Decimal);
        let raw = self.required(field)?;
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(FormError::NotANumber {
                field,
                raw: raw.to_string(),
            }),
        }
    }

    fn integer(&self, field: FormField) -> Result<i64, FormError> {
        debug_assert_eq!(field.kind(), NumericKind::Integer);
        let raw = self.required(field)?;
        if let Ok(value) = raw.parse::<i64>() {
            return Ok(value);
        }
        // Number inputs may hand back "3.0" for an integer field.
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
            Ok(value) if value.is_finite() => Err(FormError::NotAnInteger {
                field,
                raw: raw.to_string(),
            }),
            _ => Err(FormError::NotANumber {
                field,
                raw: raw.to_string(),
            }),
        }
    }

    fn required(&self, field: FormField) -> Result<&str, FormError> {
        let raw = self.get(field).trim();
        if raw.is_empty() {
            Err(FormError::Missing { field })
        } else {
            Ok(raw)
        }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
