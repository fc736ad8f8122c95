use std::fmt;

use serde::{Deserialize, Serialize};

use crate::documents::{strip_document, Cnpj, Cpf, DocumentError};

/// Who pays or receives a commission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Counterparty {
    Individual { name: String, cpf: Cpf },
    Organization { name: String, cnpj: Cnpj },
}

impl Counterparty {
    pub fn individual(name: impl Into<String>, cpf: Cpf) -> Self {
        Counterparty::Individual {
            name: name.into(),
            cpf,
        }
    }

    pub fn organization(name: impl Into<String>, cnpj: Cnpj) -> Self {
        Counterparty::Organization {
            name: name.into(),
            cnpj,
        }
    }

    /// Picks the variant from the document length: 14 digits is a CNPJ,
    /// anything else is validated as a CPF.
    pub fn from_document(name: impl Into<String>, document: &str) -> Result<Self, DocumentError> {
        if strip_document(document).len() == 14 {
            Ok(Self::organization(name, Cnpj::parse(document)?))
        } else {
            Ok(Self::individual(name, Cpf::parse(document)?))
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Counterparty::Individual { name, .. } | Counterparty::Organization { name, .. } => name,
        }
    }

    /// Formatted CPF or CNPJ.
    pub fn document_label(&self) -> String {
        match self {
            Counterparty::Individual { cpf, .. } => format!("CPF {cpf}"),
            Counterparty::Organization { cnpj, .. } => format!("CNPJ {cnpj}"),
        }
    }
}

impl fmt::Display for Counterparty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.document_label())
    }
}
