//! Syntax check of the generated module before it is handed to the bundler.

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{GenError, Result};

/// Parses `code` as a JSX ES module and fails with every parser diagnostic.
pub fn verify_module(code: &str) -> Result<()> {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_jsx(true).with_module(true);

    let ret = Parser::new(&allocator, code, source_type).parse();

    if ret.panicked || !ret.errors.is_empty() {
        let mut messages: Vec<String> = ret.errors.iter().map(|e| e.to_string()).collect();
        if messages.is_empty() {
            messages.push("parser aborted".to_string());
        }
        return Err(GenError::InvalidOutput(messages));
    }

    log::debug!("Generated module parsed: {} statements", ret.program.body.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_jsx_module() {
        let code = "import React from 'react';\nconst A = (props) => <amp-img {...props} />;\nexport { A };\n";
        assert!(verify_module(code).is_ok());
    }

    #[test]
    fn test_unclosed_element_is_rejected() {
        let code = "const A = (props) => <amp-img {...props};\nexport { A };\n";
        let err = verify_module(code).unwrap_err();
        assert!(matches!(err, GenError::InvalidOutput(ref messages) if !messages.is_empty()));
    }
}
