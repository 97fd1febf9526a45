//! Parameter marshaling between host atoms and typed parameter values.
//!
//! Three conversions, all keyed by parameter position and kind:
//!
//! - **Fetch**: positional creation arguments fill the fixed parameters.
//! - **Set**: a message's arguments build a fixed-arity value for one
//!   parameter, falling back element-wise to defaults.
//! - **Get**: a parameter's current value expands back into atoms.
//!
//! Creation argument lists are split here as well: everything before the
//! first `@tag` is positional, and each tag starts a run that extends to the
//! next tag.

use std::sync::Arc;

use tether_core::{
    AdapterError, AdapterResult, Atom, BufferRef, BufferStore, Element, Outcome, ParamKind, ParameterDescriptor,
    ParameterSet,
};

// =============================================================================
// Tag Splitting
// =============================================================================

/// A tagged run of creation arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagRun<'a> {
    /// Tag name without the leading `@`.
    pub name: &'a str,
    /// Arguments between this tag and the next one.
    pub args: &'a [Atom],
}

/// Creation arguments split into a positional prefix and tagged runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitArgs<'a> {
    pub positional: &'a [Atom],
    pub runs: Vec<TagRun<'a>>,
}

fn find_tag(args: &[Atom], start: usize) -> usize {
    args[start..]
        .iter()
        .position(Atom::is_tag)
        .map_or(args.len(), |offset| start + offset)
}

/// Split creation arguments at tags.
pub fn split_tags(args: &[Atom]) -> SplitArgs<'_> {
    let mut tag = find_tag(args, 0);
    let positional = &args[..tag];
    let mut runs = Vec::new();

    while tag < args.len() {
        let end = find_tag(args, tag + 1);
        if let Some(name) = args[tag].tag_name() {
            runs.push(TagRun {
                name,
                args: &args[tag + 1..end],
            });
        }
        tag = end;
    }

    SplitArgs { positional, runs }
}

// =============================================================================
// Atom Conversion
// =============================================================================

/// Convert one atom to an element of the given kind.
///
/// Integers truncate, floats pass through. A symbol for a buffer parameter
/// becomes a reference resolved against `store`; anything else leaves the
/// buffer unset.
pub fn element_from_atom(
    kind: ParamKind,
    atom: &Atom,
    store: Option<&Arc<dyn BufferStore>>,
) -> Element {
    match kind {
        ParamKind::Long => Element::Long(atom.as_int()),
        ParamKind::Float => Element::Float(atom.as_float()),
        ParamKind::Buffer => Element::Buffer(
            atom.as_symbol()
                .filter(|name| !name.is_empty())
                .map(|name| BufferRef::new(name.clone(), store.cloned())),
        ),
    }
}

/// Convert one element back to an atom.
pub fn element_to_atom(element: &Element) -> Atom {
    match element {
        Element::Long(v) => Atom::Float(*v as f64),
        Element::Float(v) => Atom::Float(*v),
        Element::Buffer(Some(buffer)) => Atom::Symbol(buffer.name().clone()),
        Element::Buffer(None) => Atom::Null,
    }
}

/// Build a full-arity value from as many arguments as the arity allows.
pub fn build_value(
    descriptor: &ParameterDescriptor,
    args: &[Atom],
    store: Option<&Arc<dyn BufferStore>>,
) -> Vec<Element> {
    (0..descriptor.arity)
        .map(|i| match args.get(i) {
            Some(atom) => element_from_atom(descriptor.kind, atom, store),
            None => descriptor.default_element(i),
        })
        .collect()
}

// =============================================================================
// Fetch / Set / Get
// =============================================================================

/// Fill fixed parameters from positional creation arguments.
///
/// A running cursor walks the arguments; each fixed parameter takes up to
/// its arity from the cursor and defaults for whatever is left. Returns the
/// number of arguments consumed.
pub fn fetch_fixed(
    params: &mut ParameterSet,
    positional: &[Atom],
    store: Option<&Arc<dyn BufferStore>>,
    report: &mut Outcome,
) -> AdapterResult<usize> {
    let mut cursor = 0;
    for (index, descriptor) in params.descriptors().iter().enumerate() {
        if !descriptor.is_fixed() {
            continue;
        }
        let take = descriptor.arity.min(positional.len() - cursor);
        let value = build_value(descriptor, &positional[cursor..cursor + take], store);
        cursor += take;
        params.set(index, value, Some(&mut *report))?;
    }
    Ok(cursor)
}

/// Set one parameter from message arguments.
pub fn set(
    params: &mut ParameterSet,
    index: usize,
    args: &[Atom],
    store: Option<&Arc<dyn BufferStore>>,
    report: Option<&mut Outcome>,
) -> AdapterResult<()> {
    let Some(descriptor) = params.descriptor(index) else {
        return Err(AdapterError::UnknownParameter(format!("#{}", index)));
    };
    let value = build_value(descriptor, args, store);
    params.set(index, value, report)
}

/// Current value of one parameter as atoms, one per element.
pub fn get(params: &ParameterSet, index: usize) -> Option<Vec<Atom>> {
    params
        .value(index)
        .map(|value| value.iter().map(element_to_atom).collect())
}
