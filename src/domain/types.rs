// ==========================================
// Sales Bulk Import - domain type definitions
// ==========================================
// Wire format: SCREAMING_SNAKE_CASE (matches the remote API enums)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

// ==========================================
// Item kind (line item classification)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    Product,
    Service,
}

impl ItemKind {
    /// Parse a spreadsheet value. Accepts the localized spelling
    /// (PRODUTO/SERVICO) as well as the canonical one.
    pub fn parse(raw: &str) -> Option<ItemKind> {
        match normalize_token(raw).as_str() {
            "PRODUTO" | "PRODUCT" => Some(ItemKind::Product),
            "SERVICO" | "SERVICE" => Some(ItemKind::Service),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Product => write!(f, "PRODUCT"),
            ItemKind::Service => write!(f, "SERVICE"),
        }
    }
}

// ==========================================
// Customer type
// ==========================================
// Document rule: INDIVIDUAL = 11 digits, COMPANY = 14, FOREIGN exempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Individual,
    Company,
    Foreign,
}

impl CustomerType {
    pub fn parse(raw: &str) -> Option<CustomerType> {
        match normalize_token(raw).as_str() {
            "FISICA" | "INDIVIDUAL" => Some(CustomerType::Individual),
            "JURIDICA" | "COMPANY" => Some(CustomerType::Company),
            "ESTRANGEIRA" | "ESTRANGEIRO" | "FOREIGN" => Some(CustomerType::Foreign),
            _ => None,
        }
    }

    /// Expected document length in digits, when one is mandated.
    pub fn expected_document_len(&self) -> Option<usize> {
        match self {
            CustomerType::Individual => Some(11),
            CustomerType::Company => Some(14),
            CustomerType::Foreign => None,
        }
    }

    /// Value the person-creation endpoint expects.
    pub fn remote_value(&self) -> &'static str {
        match self {
            CustomerType::Individual => "FISICA",
            CustomerType::Company => "JURIDICA",
            CustomerType::Foreign => "ESTRANGEIRA",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerType::Individual => write!(f, "INDIVIDUAL"),
            CustomerType::Company => write!(f, "COMPANY"),
            CustomerType::Foreign => write!(f, "FOREIGN"),
        }
    }
}

// ==========================================
// Canonical payment method
// ==========================================
// The remote API accepts a fixed enum; spreadsheets carry bank-flavored
// aliases (PIX_ITAU, BOLETO_CAIXA, ...) that collapse to one canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Pix,
    BoletoBancario,
    CartaoCredito,
    CartaoDebito,
    DepositoBancario,
    TransferenciaBancaria,
    Dinheiro,
    CarteiraDigital,
    CreditoLoja,
    Cheque,
}

impl PaymentMethod {
    /// Canonicalize a raw spreadsheet value.
    ///
    /// Idempotent over already-canonical values; aliases map
    /// deterministically; unknown values yield None (the payload builder
    /// turns that into an explanatory error).
    pub fn canonicalize(raw: &str) -> Option<PaymentMethod> {
        let key = normalize_token(raw);
        let direct = match key.as_str() {
            "PIX" | "QRCODE" | "CHAVE_PIX" => Some(PaymentMethod::Pix),
            "BOLETO" | "BOLETO_BANCARIO" => Some(PaymentMethod::BoletoBancario),
            "CARTAO_CREDITO" | "CREDITO" => Some(PaymentMethod::CartaoCredito),
            "CARTAO_DEBITO" | "DEBITO" => Some(PaymentMethod::CartaoDebito),
            "DEPOSITO" | "DEPOSITO_BANCARIO" => Some(PaymentMethod::DepositoBancario),
            "TRANSFERENCIA" | "TRANSFERENCIA_BANCARIA" | "TED" | "DOC" => {
                Some(PaymentMethod::TransferenciaBancaria)
            }
            "DINHEIRO" => Some(PaymentMethod::Dinheiro),
            "WALLET" | "CARTEIRA_DIGITAL" => Some(PaymentMethod::CarteiraDigital),
            "CREDITO_LOJA" => Some(PaymentMethod::CreditoLoja),
            "CHEQUE" => Some(PaymentMethod::Cheque),
            _ => None,
        };
        if direct.is_some() {
            return direct;
        }
        // Bank-suffixed variants: PIX_ITAU, BOLETO_CAIXA, ...
        if key.starts_with("PIX") {
            return Some(PaymentMethod::Pix);
        }
        if key.starts_with("BOLETO") {
            return Some(PaymentMethod::BoletoBancario);
        }
        None
    }

    /// Canonical wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::BoletoBancario => "BOLETO_BANCARIO",
            PaymentMethod::CartaoCredito => "CARTAO_CREDITO",
            PaymentMethod::CartaoDebito => "CARTAO_DEBITO",
            PaymentMethod::DepositoBancario => "DEPOSITO_BANCARIO",
            PaymentMethod::TransferenciaBancaria => "TRANSFERENCIA_BANCARIA",
            PaymentMethod::Dinheiro => "DINHEIRO",
            PaymentMethod::CarteiraDigital => "CARTEIRA_DIGITAL",
            PaymentMethod::CreditoLoja => "CREDITO_LOJA",
            PaymentMethod::Cheque => "CHEQUE",
        }
    }

    /// A short preview of valid values, for error messages.
    pub fn examples() -> &'static str {
        "PIX, BOLETO_BANCARIO, CARTAO_CREDITO, CARTAO_DEBITO, DINHEIRO, TRANSFERENCIA_BANCARIA, ..."
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// Token normalization
// ==========================================

/// Normalize an enum-like spreadsheet token: trim, NFKD-decompose and drop
/// combining marks (CARTÃO → CARTAO), uppercase, spaces/hyphens → underscore.
pub fn normalize_token(raw: &str) -> String {
    raw.trim()
        .nfkd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
        .replace(['-', ' '], "_")
}

/// Keep only ASCII digits (document fields: CPF/CNPJ).
pub fn only_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
