//! Naming convention rules.
//!
//! These rules check that TypeScript identifiers follow a case style.

mod backing_field;
mod class_members_name;
mod const_variable_name;
mod type_parameter_name;

pub use backing_field::{AccessorNameMismatch, BackingField, BackingFieldOutsideAccessor};
pub use class_members_name::{ClassMembersName, MemberNameFormat};
pub use const_variable_name::{ConstVariableName, ConstVariableNotConstantCase};
pub use type_parameter_name::{TypeParameterMissingPrefix, TypeParameterName};
