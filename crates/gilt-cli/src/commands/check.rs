//! `gilt check`: validate a manifest without evaluating it.

use std::path::Path;

use crate::manifest::{Declaration, Manifest};

pub fn execute(manifest_path: &Path) -> anyhow::Result<()> {
    let manifest = Manifest::from_file(manifest_path)?;

    let mut classes = 0;
    let mut objects = 0;
    let mut decorators = 0;
    for declaration in &manifest.declarations {
        match declaration {
            Declaration::Class(class) => {
                let decl = class.to_decl()?;
                classes += 1;
                decorators += decl.decorators.len()
                    + decl.elements.iter().map(|e| e.decorators.len()).sum::<usize>();
            }
            Declaration::Object(object) => {
                let literal = object.to_literal()?;
                objects += 1;
                decorators += literal.properties.iter().map(|p| p.decorators.len()).sum::<usize>();
            }
        }
    }

    println!(
        "{}: {} class(es), {} object(s), {} decorator(s)",
        manifest_path.display(),
        classes,
        objects,
        decorators
    );
    Ok(())
}
