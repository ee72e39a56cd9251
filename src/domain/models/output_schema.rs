/// A vendor-neutral description of the JSON shape a completion must have.
///
/// Gateways translate this into whatever schema dialect their provider
/// understands; adapters only ever build these values.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputSchema {
    Object {
        properties: Vec<SchemaProperty>,
        required: Vec<String>,
        description: Option<String>,
    },
    Array {
        items: Box<OutputSchema>,
        description: Option<String>,
    },
    String {
        description: Option<String>,
    },
    Number {
        description: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaProperty {
    pub name: String,
    pub schema: OutputSchema,
}

impl OutputSchema {
    pub fn string() -> Self {
        Self::String { description: None }
    }

    pub fn number() -> Self {
        Self::Number { description: None }
    }

    pub fn array_of(items: OutputSchema) -> Self {
        Self::Array {
            items: Box::new(items),
            description: None,
        }
    }

    /// An object with no properties yet; add them with [`Self::with_property`].
    pub fn object() -> Self {
        Self::Object {
            properties: Vec::new(),
            required: Vec::new(),
            description: None,
        }
    }

    /// Append a property to an object schema, marking it required when asked.
    /// Has no effect on non-object schemas.
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        schema: OutputSchema,
        is_required: bool,
    ) -> Self {
        if let Self::Object {
            properties,
            required,
            ..
        } = &mut self
        {
            let name = name.into();
            if is_required {
                required.push(name.clone());
            }
            properties.push(SchemaProperty { name, schema });
        }
        self
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match &mut self {
            Self::Object { description, .. }
            | Self::Array { description, .. }
            | Self::String { description }
            | Self::Number { description } => *description = text,
        }
        self
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Object { description, .. }
            | Self::Array { description, .. }
            | Self::String { description }
            | Self::Number { description } => description.as_deref(),
        }
    }

    /// Names of required properties; empty for non-object schemas.
    pub fn required(&self) -> &[String] {
        match self {
            Self::Object { required, .. } => required,
            _ => &[],
        }
    }

    pub fn property(&self, name: &str) -> Option<&OutputSchema> {
        match self {
            Self::Object { properties, .. } => properties
                .iter()
                .find(|p| p.name == name)
                .map(|p| &p.schema),
            _ => None,
        }
    }
}
