use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Location};

/// A compile error together with the location it was detected at.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at {location}")]
pub struct Error {
    internal_error: ErrorImpl,
    location: Location,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: Location) -> Self {
        Error {
            internal_error: error_impl,
            location,
        }
    }

    pub fn get_location(&self) -> &Location {
        &self.location
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::ParsePrimaryError { .. } => "ParsePrimaryError",
            ErrorImpl::ParseTokenError { .. } => "ParseTokenError",
            ErrorImpl::ParseTypeError { .. } => "ParseTypeError",
            ErrorImpl::ParseCompoundError => "ParseCompoundError",
            ErrorImpl::ParseDeclarationError { .. } => "ParseDeclarationError",
            ErrorImpl::ParseNonLvalueError => "ParseNonLvalueError",
            ErrorImpl::ParseProgramError { .. } => "ParseProgramError",
            ErrorImpl::FnDeclArgsCountMismatchError { .. } => "FnDeclArgsCountMismatchError",
            ErrorImpl::FnDeclSignatureError { .. } => "FnDeclSignatureError",
            ErrorImpl::RedefinitionError { .. } => "RedefinitionError",
            ErrorImpl::UndefinedSymbolError { .. } => "UndefinedSymbolError",
            ErrorImpl::ArithmTypeError => "ArithmTypeError",
            ErrorImpl::IfConditionTypeError { .. } => "IfConditionTypeError",
            ErrorImpl::IfBranchesTypeError { .. } => "IfBranchesTypeError",
            ErrorImpl::FnCallNonFuncTypeError { .. } => "FnCallNonFuncTypeError",
            ErrorImpl::FnCallArgCountMismatchError { .. } => "FnCallArgCountMismatchError",
            ErrorImpl::FnCallArgTypeMismatchError { .. } => "FnCallArgTypeMismatchError",
            ErrorImpl::ReturnOutsideFnError => "ReturnOutsideFnError",
            ErrorImpl::WrongReturnTypeError { .. } => "WrongReturnTypeError",
            ErrorImpl::BadAssignmentError => "BadAssignmentError",
            ErrorImpl::NonVarAssignError { .. } => "NonVarAssignError",
            ErrorImpl::AssignmentTypeMismatchError { .. } => "AssignmentTypeMismatchError",
            ErrorImpl::VarDeclInitTypeMismatchError { .. } => "VarDeclInitTypeMismatchError",
            ErrorImpl::UntypedSymbolError { .. } => "UntypedSymbolError",
            ErrorImpl::MissingSignatureError { .. } => "MissingSignatureError",
            ErrorImpl::InternalError { .. } => "InternalError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("Add the closing `\"` of the string literal"))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::ParseTokenError { expected, .. } if *expected == TokenKind::Semicolon => {
                ErrorTip::Suggestion(String::from("Did you miss a semicolon?"))
            }
            ErrorImpl::ParseDeclarationError { .. } => ErrorTip::Suggestion(String::from(
                "Only `var` and `fun` declarations are allowed at the top level",
            )),
            ErrorImpl::ParseNonLvalueError => {
                ErrorTip::Suggestion(String::from("Only variables can be assigned to"))
            }
            ErrorImpl::UndefinedSymbolError { symbol } => ErrorTip::Suggestion(format!(
                "Local `{}` must be declared before it is used",
                symbol
            )),
            ErrorImpl::UntypedSymbolError { symbol } => ErrorTip::Suggestion(format!(
                "Add an `of <type>` signature to the declaration of `{}`",
                symbol
            )),
            ErrorImpl::MissingSignatureError { function } => ErrorTip::Suggestion(format!(
                "Functions need a signature, e.g. `of [Int] -> Int fun {}(x) = x;`",
                function
            )),
            _ => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("no token could be matched at {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected end of the string literal")]
    UnterminatedString,
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Syntactic
    #[error("could not match primary expression at {token:?}")]
    ParsePrimaryError { token: String },
    #[error("expected token {expected}, found {found:?}")]
    ParseTokenError { expected: TokenKind, found: String },
    #[error("could not parse the type at {token:?}")]
    ParseTypeError { token: String },
    #[error("some errors in compound block have occurred")]
    ParseCompoundError,
    #[error("expected declaration, found {token:?}")]
    ParseDeclarationError { token: String },
    #[error("expected lvalue on the left side of the assignment")]
    ParseNonLvalueError,
    #[error("program has {errors} syntax error(s)")]
    ParseProgramError { errors: usize },
    #[error("function {function:?} declares {received} parameter(s) but its signature has {expected}")]
    FnDeclArgsCountMismatchError {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("signature of function {function:?} is not a function type: {signature}")]
    FnDeclSignatureError { function: String, signature: String },

    // Scope
    #[error("redefinition of symbol {symbol:?} (already defined in current scope)")]
    RedefinitionError { symbol: String },
    #[error("use of undefined symbol {symbol:?}")]
    UndefinedSymbolError { symbol: String },

    // Types
    #[error("arithmetic operation has non-int operand")]
    ArithmTypeError,
    #[error("if condition has non-bool type {found}")]
    IfConditionTypeError { found: String },
    #[error("if branches have different types: {then_type} and {else_type}")]
    IfBranchesTypeError { then_type: String, else_type: String },
    #[error("function call with non-functional callable of type {found}")]
    FnCallNonFuncTypeError { found: String },
    #[error("wrong amount of arguments for function call: expected {expected}, received {received}")]
    FnCallArgCountMismatchError { expected: usize, received: usize },
    #[error("wrong type of argument {index} for function call: expected {expected}, received {received}")]
    FnCallArgTypeMismatchError {
        index: usize,
        expected: String,
        received: String,
    },
    #[error("return expression outside function")]
    ReturnOutsideFnError,
    #[error("wrong type of return expression: expected {expected}, received {received}")]
    WrongReturnTypeError { expected: String, received: String },
    #[error("bad assignment left-hand side")]
    BadAssignmentError,
    #[error("bad assignment to {symbol:?}: can assign only variables")]
    NonVarAssignError { symbol: String },
    #[error("different types on the sides of assignment: expected {expected}, received {received}")]
    AssignmentTypeMismatchError { expected: String, received: String },
    #[error("wrong type of initial value during variable declaration: expected {expected}, received {received}")]
    VarDeclInitTypeMismatchError { expected: String, received: String },
    #[error("type of symbol {symbol:?} is not known here")]
    UntypedSymbolError { symbol: String },
    #[error("function {function:?} has no type signature")]
    MissingSignatureError { function: String },

    #[error("internal error: {message}")]
    InternalError { message: String },
}

/// Errors reported by the parser while it recovered from them.
///
/// The last entry is always the aggregate error that stopped the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.get_error_name()).collect()
    }

    /// The errors worth showing to a user.
    ///
    /// `ParseCompoundError` only marks a block that already reported its
    /// own errors, so it is left out.
    pub fn reportable(&self) -> impl Iterator<Item = &Error> {
        self.errors
            .iter()
            .filter(|e| !matches!(e.get_kind(), ErrorImpl::ParseCompoundError))
    }
}

impl From<Error> for Diagnostics {
    fn from(error: Error) -> Self {
        Diagnostics {
            errors: vec![error],
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
