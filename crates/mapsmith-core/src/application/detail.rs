//! Use-case detail assembly.
//!
//! Glues the resolver, synthesizer and example parser together: one
//! [`UseCaseDetail`] per use case defined in the profile, ready for the
//! template engine. Authored examples win; synthesis only fills slots no
//! example covers.

use tracing::debug;

use crate::domain::error::ModelError;
use crate::domain::model::{UseCaseDetail, UseCaseExample};
use crate::domain::profile::{
    AstNode, Definition, KnownDefinition, ProfileAst, UseCaseDefinition,
};

use super::context::ResolveContext;
use super::example_parser;
use super::resolver;
use super::synthesizer;

/// Build the renderable details for every use case in the profile, in
/// authoring order.
pub fn build_use_case_details(profile: &ProfileAst) -> Result<Vec<UseCaseDetail>, ModelError> {
    let ctx = ResolveContext::from_definitions(&profile.definitions);

    let mut details = Vec::new();
    for definition in &profile.definitions {
        let Definition::Known(KnownDefinition::UseCaseDefinition(use_case)) = definition else {
            continue;
        };
        details.push(build_detail(use_case, &ctx)?);
    }
    debug!(
        profile = %profile.profile_id(),
        use_cases = details.len(),
        "built use case details"
    );
    Ok(details)
}

fn build_detail(
    use_case: &UseCaseDefinition,
    ctx: &ResolveContext<'_>,
) -> Result<UseCaseDetail, ModelError> {
    let input = resolver::resolve(use_case.input.as_ref(), false, ctx)?;
    let result = resolver::resolve(use_case.result.as_ref(), false, ctx)?;
    let error = resolver::resolve(use_case.error.as_ref(), false, ctx)?;

    // Authored examples: the first node carrying a result seeds the success
    // example, the first carrying an error seeds the error example.
    let authored_success = use_case.examples.iter().find(|ex| ex.result.is_some());
    let authored_error = use_case.examples.iter().find(|ex| ex.error.is_some());

    let success_example = match authored_success {
        Some(example) => Some(UseCaseExample {
            input: example_parser::parse(example.input.as_ref()),
            output: example_parser::parse(example.result.as_ref()),
        }),
        None => synthesized_example(
            use_case.input.as_ref(),
            use_case.result.as_ref(),
            ctx,
        )?,
    };

    let error_example = match authored_error {
        Some(example) => Some(UseCaseExample {
            input: example_parser::parse(example.input.as_ref()),
            output: example_parser::parse(example.error.as_ref()),
        }),
        None => synthesized_example(use_case.input.as_ref(), use_case.error.as_ref(), ctx)?,
    };

    Ok(UseCaseDetail {
        name: use_case.use_case_name.clone(),
        title: use_case.title.clone(),
        description: use_case.description.clone(),
        input,
        result,
        error,
        success_example,
        error_example,
    })
}

/// Synthesize a slot example from the declared types. Slots without a type
/// stay empty; a use case with neither input nor output type gets no
/// example at all.
fn synthesized_example(
    input: Option<&AstNode>,
    output: Option<&AstNode>,
    ctx: &ResolveContext<'_>,
) -> Result<Option<UseCaseExample>, ModelError> {
    if input.is_none() && output.is_none() {
        return Ok(None);
    }
    let input = input
        .map(|node| synthesizer::synthesize(node, ctx))
        .transpose()?;
    let output = output
        .map(|node| synthesizer::synthesize(node, ctx))
        .transpose()?;
    Ok(Some(UseCaseExample { input, output }))
}
