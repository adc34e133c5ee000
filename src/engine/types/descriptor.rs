use std::fmt;

use crate::engine::errors::PlanError;

/// Category of a declared argument type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Primitive,
    List,
    Map,
    Struct,
    Union,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveCategory {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Timestamp,
    Date,
    Decimal,
    Binary,
}

impl PrimitiveCategory {
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveCategory::Boolean => "boolean",
            PrimitiveCategory::Byte => "tinyint",
            PrimitiveCategory::Short => "smallint",
            PrimitiveCategory::Int => "int",
            PrimitiveCategory::Long => "bigint",
            PrimitiveCategory::Float => "float",
            PrimitiveCategory::Double => "double",
            PrimitiveCategory::String => "string",
            PrimitiveCategory::Timestamp => "timestamp",
            PrimitiveCategory::Date => "date",
            PrimitiveCategory::Decimal => "decimal",
            PrimitiveCategory::Binary => "binary",
        }
    }

    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            PrimitiveCategory::Byte
                | PrimitiveCategory::Short
                | PrimitiveCategory::Int
                | PrimitiveCategory::Long
        )
    }

    fn from_name(name: &str) -> Option<Self> {
        let category = match name {
            "boolean" => PrimitiveCategory::Boolean,
            "tinyint" => PrimitiveCategory::Byte,
            "smallint" => PrimitiveCategory::Short,
            "int" | "integer" => PrimitiveCategory::Int,
            "bigint" => PrimitiveCategory::Long,
            "float" => PrimitiveCategory::Float,
            "double" | "double precision" => PrimitiveCategory::Double,
            "string" => PrimitiveCategory::String,
            "timestamp" => PrimitiveCategory::Timestamp,
            "date" => PrimitiveCategory::Date,
            "binary" => PrimitiveCategory::Binary,
            _ => return None,
        };
        Some(category)
    }
}

/// Declared type of an aggregate argument, resolved once at plan time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(PrimitiveCategory),
    List(Box<TypeDescriptor>),
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Struct(Vec<(String, TypeDescriptor)>),
    Union(Vec<TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn category(&self) -> TypeCategory {
        match self {
            TypeDescriptor::Primitive(_) => TypeCategory::Primitive,
            TypeDescriptor::List(_) => TypeCategory::List,
            TypeDescriptor::Map { .. } => TypeCategory::Map,
            TypeDescriptor::Struct(_) => TypeCategory::Struct,
            TypeDescriptor::Union(_) => TypeCategory::Union,
        }
    }

    pub fn primitive(&self) -> Option<PrimitiveCategory> {
        match self {
            TypeDescriptor::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn type_name(&self) -> String {
        self.to_string()
    }
}

impl From<PrimitiveCategory> for TypeDescriptor {
    fn from(value: PrimitiveCategory) -> Self {
        TypeDescriptor::Primitive(value)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(p) => f.write_str(p.type_name()),
            TypeDescriptor::List(elem) => write!(f, "array<{}>", elem),
            TypeDescriptor::Map { key, value } => write!(f, "map<{},{}>", key, value),
            TypeDescriptor::Struct(fields) => {
                f.write_str("struct<")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}:{}", name, ty)?;
                }
                f.write_str(">")
            }
            TypeDescriptor::Union(members) => {
                f.write_str("uniontype<")?;
                for (i, ty) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", ty)?;
                }
                f.write_str(">")
            }
        }
    }
}

/// Parses SQL type names such as `int`, `varchar(10)`, `decimal(10,2)`,
/// `array<bigint>` or `struct<a:int,b:map<string,double>>`.
pub(super) fn parse(raw: &str) -> Result<TypeDescriptor, PlanError> {
    let invalid = || PlanError::InvalidType(raw.to_string());
    let s = raw.trim().to_ascii_lowercase();
    if s.is_empty() {
        return Err(invalid());
    }

    if let Some((head, inner)) = split_generic(&s) {
        let parts = split_top_level(inner);
        return match head {
            "array" => match parts.as_slice() {
                [elem] => Ok(TypeDescriptor::List(Box::new(parse(elem)?))),
                _ => Err(invalid()),
            },
            "map" => match parts.as_slice() {
                [key, value] => Ok(TypeDescriptor::Map {
                    key: Box::new(parse(key)?),
                    value: Box::new(parse(value)?),
                }),
                _ => Err(invalid()),
            },
            "struct" => {
                let mut fields = Vec::with_capacity(parts.len());
                for part in parts {
                    let (name, ty) = part.split_once(':').ok_or_else(invalid)?;
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(invalid());
                    }
                    fields.push((name.to_string(), parse(ty)?));
                }
                if fields.is_empty() {
                    return Err(invalid());
                }
                Ok(TypeDescriptor::Struct(fields))
            }
            "uniontype" => {
                let members = parts
                    .into_iter()
                    .map(parse)
                    .collect::<Result<Vec<_>, _>>()?;
                if members.is_empty() {
                    return Err(invalid());
                }
                Ok(TypeDescriptor::Union(members))
            }
            _ => Err(invalid()),
        };
    }

    // Parameterized primitives: varchar(n), char(n), decimal(p,s)
    let base = match s.find('(') {
        Some(idx) if s.ends_with(')') => s[..idx].trim(),
        Some(_) => return Err(invalid()),
        None => s.as_str(),
    };
    let category = match base {
        "varchar" | "char" => PrimitiveCategory::String,
        "decimal" | "numeric" => PrimitiveCategory::Decimal,
        other => PrimitiveCategory::from_name(other).ok_or_else(invalid)?,
    };
    Ok(TypeDescriptor::Primitive(category))
}

fn split_generic(s: &str) -> Option<(&str, &str)> {
    let open = s.find('<')?;
    if !s.ends_with('>') {
        return None;
    }
    Some((s[..open].trim(), &s[open + 1..s.len() - 1]))
}

/// Splits on commas that are not nested inside `<...>` or `(...)`.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = s[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}
