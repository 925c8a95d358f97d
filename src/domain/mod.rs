// Domain model: parsed templates and the values they expand

pub mod template;
pub mod value;
