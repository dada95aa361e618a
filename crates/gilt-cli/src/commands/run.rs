//! `gilt run`: evaluate every declaration in a manifest and print the
//! resulting properties.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use gilt_engine::{register_builtins, Engine, Environment, InvocationRecord, ObjectRef, Value};

use super::load_config;
use crate::manifest::{Declaration, Manifest};
use crate::output::{resolve_color_choice, StyledOutput};

/// Keys the class tables leave out
const HIDDEN_KEYS: &[&str] = &["prototype", "constructor"];

pub struct RunArgs {
    pub manifest: PathBuf,
    pub config: Option<PathBuf>,
    pub trace: bool,
    pub color: Option<String>,
}

pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let manifest = Manifest::from_file(&args.manifest)?;
    let config = load_config(&args.manifest, args.config.as_deref())?;
    let mut out = StyledOutput::new(resolve_color_choice(args.color.as_deref()));

    let mut env = Environment::new();
    register_builtins(&mut env);

    let trace_lines = Rc::new(RefCell::new(Vec::new()));
    let mut engine = Engine::new().with_config(config);
    if args.trace {
        let sink = trace_lines.clone();
        engine = engine.with_observer(move |record: &InvocationRecord<'_>| {
            sink.borrow_mut().push(format_record(record));
        });
    }

    for declaration in &manifest.declarations {
        match declaration {
            Declaration::Class(spec) => {
                let decl = spec.to_decl()?;
                let result = engine.define_class(&decl, &mut env);
                flush_trace(&mut out, &trace_lines);
                let constructor =
                    result.with_context(|| format!("Failed to evaluate class {}", spec.class))?;
                print_class(&mut out, &spec.class, &constructor);
            }
            Declaration::Object(spec) => {
                let literal = spec.to_literal()?;
                let result = engine.evaluate_object_literal(&literal, &env);
                flush_trace(&mut out, &trace_lines);
                let object =
                    result.with_context(|| format!("Failed to evaluate object {}", spec.object))?;
                out.header("object", &spec.object);
                out.property_table("own", &object, &[]);
                env.define(spec.object.clone(), Value::Object(object));
            }
        }
    }

    out.flush();
    Ok(())
}

fn print_class(out: &mut StyledOutput, name: &str, constructor: &ObjectRef) {
    out.header("class", name);
    out.property_table("static", constructor, HIDDEN_KEYS);
    if let Ok(Value::Object(prototype)) = constructor.get(&"prototype".into()) {
        out.property_table("prototype", &prototype, HIDDEN_KEYS);
    }
}

fn flush_trace(out: &mut StyledOutput, lines: &Rc<RefCell<Vec<String>>>) {
    for line in lines.borrow_mut().drain(..) {
        out.trace_line(&line);
    }
}

/// `@readonly kidCount on Person.prototype (mutation)`
fn format_record(record: &InvocationRecord<'_>) -> String {
    match record.name {
        Some(name) => format!(
            "{} {} on {} ({})",
            record.decorator.label,
            name,
            record.target.describe(),
            record.discipline
        ),
        None => format!(
            "{} on {} ({})",
            record.decorator.label,
            record.target.describe(),
            record.discipline
        ),
    }
}
