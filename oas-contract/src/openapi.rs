// Copyright 2025 Oxide Computer Company

//! Projection of an OpenAPI 3 document onto the compatibility model
//!
//! Only what the verifier compares is kept: paths, operations, and for each
//! parameter its name, location, required flag, type, and bounds.  Local
//! `#/components/...` references are followed; anything else is an error.

use crate::error::ImportError;
use crate::model::{
    Document, Operation, Parameter, ParameterKind, ParameterType, PathItem,
};
use openapiv3::{OpenAPI, ParameterSchemaOrContent, ReferenceOr, SchemaKind};
use rust_decimal::Decimal;

const PARAMETER_PREFIX: &str = "#/components/parameters/";
const SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Reference chains longer than this are assumed to be cycles.
const MAX_REFERENCE_DEPTH: usize = 32;

impl TryFrom<&OpenAPI> for Document {
    type Error = ImportError;

    fn try_from(api: &OpenAPI) -> Result<Document, ImportError> {
        let mut document = Document::new();
        for (path, item) in api.paths.iter() {
            let item = match item {
                ReferenceOr::Item(item) => item,
                ReferenceOr::Reference { reference } => {
                    return Err(ImportError::UnsupportedReference {
                        reference: reference.clone(),
                    });
                }
            };

            let mut path_item = PathItem::new();
            for (method, op) in item.iter() {
                // Path-level parameters come first so that an operation's own
                // definition of the same parameter replaces them.
                let parameters = item
                    .parameters
                    .iter()
                    .chain(op.parameters.iter())
                    .map(|p| import_parameter(api, path, method, p))
                    .collect::<Result<Vec<_>, _>>()?;
                path_item = path_item
                    .with_operation(method, Operation { parameters });
            }
            document = document.with_path(path.as_str(), path_item);
        }
        Ok(document)
    }
}

fn import_parameter(
    api: &OpenAPI,
    path: &str,
    method: &str,
    parameter: &ReferenceOr<openapiv3::Parameter>,
) -> Result<Parameter, ImportError> {
    let parameter = resolve(parameter, PARAMETER_PREFIX, |name| {
        api.components.as_ref()?.parameters.get(name)
    })?;

    let kind = match parameter {
        openapiv3::Parameter::Query { .. } => ParameterKind::Query,
        openapiv3::Parameter::Header { .. } => ParameterKind::Header,
        openapiv3::Parameter::Path { .. } => ParameterKind::Path,
        openapiv3::Parameter::Cookie { .. } => ParameterKind::Cookie,
    };
    let data = parameter.parameter_data_ref();
    let mut imported = Parameter::new(data.name.clone(), kind)
        .with_required(data.required);

    let schema = match &data.format {
        ParameterSchemaOrContent::Schema(schema) => {
            resolve(schema, SCHEMA_PREFIX, |name| {
                api.components.as_ref()?.schemas.get(name)
            })?
        }
        // Parameters described by a media type have no single type.
        ParameterSchemaOrContent::Content(_) => return Ok(imported),
    };

    let openapiv3::Schema { schema_kind, .. } = schema;
    match schema_kind {
        SchemaKind::Type(openapiv3::Type::String(s)) => {
            imported.param_type = ParameterType::String;
            imported.max_length = s.max_length;
        }
        SchemaKind::Type(openapiv3::Type::Integer(i)) => {
            imported.param_type = ParameterType::Integer;
            imported.maximum = i.maximum.map(Decimal::from);
        }
        SchemaKind::Type(openapiv3::Type::Number(n)) => {
            imported.param_type = ParameterType::Number;
            imported.maximum = n
                .maximum
                .map(|value| {
                    Decimal::try_from(value).map_err(|_| {
                        ImportError::InvalidMaximum {
                            path: path.to_owned(),
                            method: method.to_owned(),
                            parameter: data.name.clone(),
                            value,
                        }
                    })
                })
                .transpose()?;
        }
        SchemaKind::Type(openapiv3::Type::Boolean(_)) => {
            imported.param_type = ParameterType::Boolean;
        }
        SchemaKind::Type(openapiv3::Type::Array(a)) => {
            imported.param_type = ParameterType::Array;
            imported.max_items = a.max_items.unwrap_or(0);
        }
        SchemaKind::Type(openapiv3::Type::Object(_)) => {
            imported.param_type = ParameterType::Object;
        }
        _ => (),
    }

    Ok(imported)
}

/// Follow local references (with the given component prefix) until reaching
/// an actual item.
fn resolve<'a, T, F>(
    mut item: &'a ReferenceOr<T>,
    prefix: &str,
    lookup: F,
) -> Result<&'a T, ImportError>
where
    F: Fn(&str) -> Option<&'a ReferenceOr<T>>,
{
    for _ in 0..MAX_REFERENCE_DEPTH {
        let reference = match item {
            ReferenceOr::Item(item) => return Ok(item),
            ReferenceOr::Reference { reference } => reference,
        };
        let Some(name) = reference.strip_prefix(prefix) else {
            return Err(ImportError::UnsupportedReference {
                reference: reference.clone(),
            });
        };
        item = lookup(name).ok_or_else(|| {
            ImportError::UnresolvedReference { reference: reference.clone() }
        })?;
    }

    let reference = match item {
        ReferenceOr::Item(item) => return Ok(item),
        ReferenceOr::Reference { reference } => reference.clone(),
    };
    Err(ImportError::ReferenceTooDeep { reference, depth: MAX_REFERENCE_DEPTH })
}
