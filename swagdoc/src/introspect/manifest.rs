//! Pre-parsed class manifest.
//!
//! ```toml
//! [[class]]
//! name = "app::controllers::PetController"
//! comment = """
//! /**
//!  * Swagger Petstore
//!  * @definition Pet
//!  */
//! """
//!
//! [[class.procedure]]
//! name = "actionGetPetById"
//! parameters = ["petId"]
//! comment = """
//! /**
//!  * Find pet by ID
//!  * @path /pet/{petId}
//!  * @method get
//!  * @parameter int64 $petId
//!  * @return Pet
//!  */
//! """
//!
//! [[class]]
//! name = "app::models::Pet"
//! model = true
//!
//! [[class.field]]
//! name = "status"
//! comment = "/** @var string pet status in the store */"
//! default = "available"
//! ```

use super::{ClassInfo, Introspect};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default, rename = "class", alias = "classes")]
    classes: Vec<ClassInfo>,
}

/// Classes indexed by identifier.
#[derive(Debug, Clone, Default)]
pub struct ClassManifest {
    classes: Vec<ClassInfo>,
    index: HashMap<String, usize>,
}

impl ClassManifest {
    /// Build a manifest, filling in each procedure's declaring class.
    ///
    /// Fails on duplicate class identifiers.
    pub fn from_classes(classes: Vec<ClassInfo>) -> Result<Self> {
        let mut manifest = Self::default();
        for class in classes {
            manifest.add(class)?;
        }
        Ok(manifest)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawManifest = toml::from_str(content).context("failed to parse TOML manifest")?;
        Self::from_classes(raw.classes)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawManifest =
            serde_json::from_str(content).context("failed to parse JSON manifest")?;
        Self::from_classes(raw.classes)
    }

    /// Fold another manifest into this one.
    pub fn merge(&mut self, other: ClassManifest) -> Result<()> {
        for class in other.classes {
            self.add(class)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn add(&mut self, mut class: ClassInfo) -> Result<()> {
        if self.index.contains_key(&class.name) {
            bail!("duplicate class in manifest: {}", class.name);
        }
        for procedure in &mut class.procedures {
            if procedure.declaring_class.is_empty() {
                procedure.declaring_class = class.name.clone();
            }
        }
        self.index.insert(class.name.clone(), self.classes.len());
        self.classes.push(class);
        Ok(())
    }
}

impl Introspect for ClassManifest {
    fn class(&self, id: &str) -> Option<&ClassInfo> {
        self.index.get(id).map(|&i| &self.classes[i])
    }
}
