//! Scalar bind values.
//!
//! [`SqlValue`] is the value type carried by update maps and filter criteria.
//! It covers the scalars an API payload can hold (text, numbers, booleans and
//! `null`) and binds to whatever parameter type Postgres infers for the
//! placeholder, so `"num_employees"=$1` works whether the column is `integer`
//! or `bigint`.

use crate::error::{JoblyError, JoblyResult};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};

/// A scalar value bound to a positional parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// SQL `NULL`
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }

    fn mismatch(&self, ty: &Type) -> Box<dyn Error + Sync + Send> {
        Box::new(BindError(format!(
            "cannot bind {} value to parameter of type {}",
            self.kind(),
            ty
        )))
    }

    fn out_of_range(&self, ty: &Type) -> Box<dyn Error + Sync + Send> {
        Box::new(BindError(format!(
            "{} value is out of range for parameter of type {}",
            self.kind(),
            ty
        )))
    }

    /// Narrow an integral value to an integer parameter type.
    fn to_int_sql(
        &self,
        v: i64,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match *ty {
            Type::INT2 => i16::try_from(v)
                .map_err(|_| self.out_of_range(ty))?
                .to_sql(ty, out),
            Type::INT4 => i32::try_from(v)
                .map_err(|_| self.out_of_range(ty))?
                .to_sql(ty, out),
            _ => v.to_sql(ty, out),
        }
    }
}

/// A value could not be encoded for the parameter type Postgres inferred.
///
/// Surfaces as [`JoblyError::InvalidInput`] once the statement fails.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct BindError(String);

impl ToSql for SqlValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Self::Null => Ok(IsNull::Yes),
            Self::Bool(v) if *ty == Type::BOOL => v.to_sql(ty, out),
            Self::Int(v) => match *ty {
                Type::INT2 | Type::INT4 | Type::INT8 => self.to_int_sql(*v, ty, out),
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                Type::FLOAT8 => (*v as f64).to_sql(ty, out),
                _ => Err(self.mismatch(ty)),
            },
            Self::Float(v) => match *ty {
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                Type::FLOAT8 => v.to_sql(ty, out),
                // Whole floats such as `10.0` still bind to integer columns.
                Type::INT2 | Type::INT4 | Type::INT8
                    if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v < i64::MAX as f64 =>
                {
                    self.to_int_sql(*v as i64, ty, out)
                }
                _ => Err(self.mismatch(ty)),
            },
            Self::Text(v) if <&str as ToSql>::accepts(ty) => v.as_str().to_sql(ty, out),
            _ => Err(self.mismatch(ty)),
        }
    }

    // Type checks happen per variant in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        Self::Int(v.into())
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for SqlValue {
    type Error = JoblyError;

    fn try_from(value: serde_json::Value) -> JoblyResult<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                None => n
                    .as_f64()
                    .map(Self::Float)
                    .ok_or_else(|| JoblyError::invalid_input(format!("unsupported number: {n}"))),
            },
            Value::String(s) => Ok(Self::Text(s)),
            Value::Array(_) | Value::Object(_) => Err(JoblyError::invalid_input(
                "only scalar values can be bound",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: &SqlValue, ty: Type) -> Result<(IsNull, BytesMut), String> {
        let mut buf = BytesMut::new();
        value
            .to_sql(&ty, &mut buf)
            .map(|is_null| (is_null, buf))
            .map_err(|e| e.to_string())
    }

    fn encode_err(value: &SqlValue, ty: Type) -> Box<dyn Error + Sync + Send> {
        let mut buf = BytesMut::new();
        value.to_sql(&ty, &mut buf).err().unwrap()
    }

    #[test]
    fn int_narrows_to_int4() {
        let (is_null, buf) = encode(&SqlValue::Int(42), Type::INT4).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(&buf[..], &42_i32.to_be_bytes());
    }

    #[test]
    fn int_binds_to_int8_unchanged() {
        let (_, buf) = encode(&SqlValue::Int(7), Type::INT8).unwrap();
        assert_eq!(&buf[..], &7_i64.to_be_bytes());
    }

    #[test]
    fn whole_float_binds_to_int4() {
        let (_, buf) = encode(&SqlValue::Float(10.0), Type::INT4).unwrap();
        assert_eq!(&buf[..], &10_i32.to_be_bytes());
    }

    #[test]
    fn fractional_float_to_integer_is_bind_error() {
        let err = encode_err(&SqlValue::Float(2.5), Type::INT4);
        assert!(err.downcast_ref::<BindError>().is_some());
        assert!(err.to_string().contains("float"), "{err}");
    }

    #[test]
    fn out_of_range_is_bind_error() {
        let err = encode_err(&SqlValue::Int(100_000), Type::INT2);
        assert!(err.downcast_ref::<BindError>().is_some());
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn text_binds_to_text() {
        let (_, buf) = encode(&SqlValue::from("%C1%"), Type::TEXT).unwrap();
        assert_eq!(&buf[..], b"%C1%");
    }

    #[test]
    fn text_to_integer_parameter_is_rejected() {
        let err = encode(&SqlValue::from("three"), Type::INT4).err().unwrap();
        assert!(err.contains("text"), "{err}");
    }

    #[test]
    fn null_binds_to_any_type() {
        let (is_null, buf) = encode(&SqlValue::Null, Type::INT4).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(buf.is_empty());
    }

    #[test]
    fn option_none_is_null() {
        assert_eq!(SqlValue::from(None::<i32>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some("x")), SqlValue::Text("x".into()));
    }

    #[test]
    fn deserializes_json_scalars() {
        let values: Vec<SqlValue> =
            serde_json::from_value(json!([null, true, 3, 1.5, "acme"])).unwrap();
        assert_eq!(
            values,
            vec![
                SqlValue::Null,
                SqlValue::Bool(true),
                SqlValue::Int(3),
                SqlValue::Float(1.5),
                SqlValue::Text("acme".into()),
            ]
        );
    }

    #[test]
    fn try_from_json_rejects_arrays() {
        let err = SqlValue::try_from(json!([1, 2])).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
