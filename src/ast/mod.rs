/// AST (Abstract Syntax Tree) module
/// Contains the expression tree produced by the parser and checked by the type checker
///
/// Submodules:
/// - ast: The `Node` enum and its helpers
/// - nodes: Payload structs for each node variant
/// - types: The type model and runtime values
pub mod ast;
pub mod nodes;
pub mod types;
