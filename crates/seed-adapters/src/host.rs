//! Conversión de tipos del host a `Value`.
//!
//! `IntoSeedValue` es la costura entre el host y el núcleo: cada tipo sabe
//! producir su `Value` (o fallar con `SeedError`). Lo no representable entra
//! como `Opaque` con el nombre de tipo y la representación capturados aquí,
//! antes de llegar al codificador. Un `Value` ya construido se presta tal
//! cual: el árbol no se recorre hasta que lo hace el codificador, que es
//! quien aplica el límite de profundidad.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use seed_core::{Opaque, SeedConfig, SeedError, Value};
use uuid::Uuid;

use crate::error::AdapterError;
use crate::{json, tagged};

pub trait IntoSeedValue {
    fn to_seed_value(&self, config: &SeedConfig) -> Result<Cow<'_, Value>, SeedError>;
}

impl IntoSeedValue for Value {
    fn to_seed_value(&self, _config: &SeedConfig) -> Result<Cow<'_, Value>, SeedError> {
        Ok(Cow::Borrowed(self))
    }
}

impl IntoSeedValue for serde_json::Value {
    fn to_seed_value(&self, config: &SeedConfig) -> Result<Cow<'_, Value>, SeedError> {
        Ok(Cow::Owned(json::from_json(self, config.max_depth)?))
    }
}

/// JSON interpretado con la notación etiquetada (`$symbol`, `$time`, ...).
#[derive(Debug, Clone, Copy)]
pub struct Tagged<'a>(pub &'a serde_json::Value);

impl IntoSeedValue for Tagged<'_> {
    fn to_seed_value(&self, config: &SeedConfig) -> Result<Cow<'_, Value>, SeedError> {
        Ok(Cow::Owned(tagged::from_tagged_json(self.0, config.max_depth)?))
    }
}

impl IntoSeedValue for DateTime<Utc> {
    fn to_seed_value(&self, _config: &SeedConfig) -> Result<Cow<'_, Value>, SeedError> {
        Ok(Cow::Owned(Value::from(*self)))
    }
}

impl IntoSeedValue for Uuid {
    fn to_seed_value(&self, _config: &SeedConfig) -> Result<Cow<'_, Value>, SeedError> {
        Ok(Cow::Owned(Value::Opaque(Opaque::capture("Uuid", self))))
    }
}

/// Objeto arbitrario visto a través de su `Display`.
pub struct Displayed<'a, T: ?Sized> {
    pub type_name: &'a str,
    pub value: &'a T,
}

impl<T: fmt::Display + ?Sized> IntoSeedValue for Displayed<'_, T> {
    fn to_seed_value(&self, _config: &SeedConfig) -> Result<Cow<'_, Value>, SeedError> {
        Ok(Cow::Owned(Value::Opaque(capture_display(self.type_name, self.value)?)))
    }
}

/// Captura la representación de un `Display` del host. Un `fmt::Error`
/// durante el formateo se convierte en error de cálculo.
pub fn capture_display<T>(type_name: &str, value: &T) -> Result<Opaque, AdapterError>
    where T: fmt::Display + ?Sized
{
    if type_name.is_empty() {
        return Err(AdapterError::Render { type_name: "<anonymous>".into(),
                                          reason: "type has no name".into() });
    }
    let mut rendering = String::new();
    fmt::write(&mut rendering, format_args!("{value}")).map_err(|e| AdapterError::Render { type_name: type_name.into(),
                                                                                          reason: e.to_string() })?;
    Ok(Opaque::new(type_name, rendering))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn display_capture_uses_type_and_rendering() {
        let o = capture_display("Version", &"1.2.3").expect("capture");
        assert_eq!(o.payload(), "Version:1.2.3");
    }

    #[test]
    fn failing_display_is_a_render_error() {
        assert!(matches!(capture_display("Broken", &Broken), Err(AdapterError::Render { .. })));
    }

    #[test]
    fn anonymous_types_are_rejected() {
        assert!(capture_display("", &1).is_err());
    }

    #[test]
    fn failing_display_surfaces_as_seed_computation() {
        let res = Displayed { type_name: "Broken", value: &Broken }.to_seed_value(&SeedConfig::default());
        assert!(matches!(res, Err(SeedError::SeedComputation(_))));
    }

    #[test]
    fn uuid_is_opaque() {
        let id = Uuid::nil();
        let v = id.to_seed_value(&SeedConfig::default()).expect("uuid").into_owned();
        assert_eq!(v, Value::Opaque(Opaque::new("Uuid", "00000000-0000-0000-0000-000000000000")));
    }

    #[test]
    fn native_values_are_borrowed() {
        let v = Value::array(vec![1, 2]);
        let seen = v.to_seed_value(&SeedConfig::default()).expect("value");
        assert!(matches!(seen, Cow::Borrowed(_)));
        assert!(std::ptr::eq(seen.as_ref(), &v));
    }
}
