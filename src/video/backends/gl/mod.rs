mod types;
mod visitor;

pub use self::visitor::GLVisitor;
