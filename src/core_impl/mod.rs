use std::collections::HashMap;

use crate::{Error, Result};

mod dom;
mod form_controls;
mod html;

pub use dom::{Document, NodeId};
pub use form_controls::{DocumentField, DocumentForm, ElementRef};
