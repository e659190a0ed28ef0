//! Assemble a satisfiability query from a boolean expression.

use satlint_smtlib::command::Command;
use satlint_smtlib::script::Script;

use crate::ast::Expr;
use crate::encode_term::{TranslationError, Translator};

/// Build the complete solver script for one expression.
///
/// Layout: a comment naming the analyzed expression, one `declare-const` per
/// free variable in first-binding order, a single assertion of the translated
/// formula, `check-sat`, `get-model`. The root must translate to a boolean
/// term; degradation applies to sub-expressions only, so a failing root fails
/// the whole query and nothing is submitted.
pub fn build_query(expr: &Expr) -> Result<Script, TranslationError> {
    let mut translator = Translator::new();
    let root = translator.translate(expr)?;
    let formula = root.as_bool().cloned().ok_or_else(|| {
        let message = format!(
            "root of '{expr}' translated at sort {sort}, expected Bool",
            sort = root.sort
        );
        tracing::error!(error = %message, "query assembly failed");
        TranslationError::Internal(message)
    })?;

    let mut script = Script::new();
    script.push(Command::Comment(format!("satisfiability of `{expr}`")));
    for (name, sort) in translator.declarations() {
        script.push(Command::DeclareConst(name.clone(), sort.clone()));
    }
    script.push(Command::Assert(formula));
    script.push(Command::CheckSat);
    script.push(Command::GetModel);
    Ok(script)
}
