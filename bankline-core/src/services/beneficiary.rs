//! Beneficiary service - saved transfer recipients

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::domain::responses::{BeneficiaryListResponse, BeneficiaryResponse};
use crate::domain::result::Result;
use crate::domain::BeneficiaryInput;

/// CRUD endpoints under `/beneficiaries`
pub struct BeneficiaryService {
    client: Arc<ApiClient>,
}

impl BeneficiaryService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn get_all_beneficiaries(&self) -> Result<BeneficiaryListResponse> {
        self.client.get("/beneficiaries")
    }

    pub fn add_beneficiary(&self, input: &BeneficiaryInput) -> Result<BeneficiaryResponse> {
        self.client.post("/beneficiaries", input)
    }

    pub fn update_beneficiary(
        &self,
        id: &str,
        input: &BeneficiaryInput,
    ) -> Result<BeneficiaryResponse> {
        self.client.put(&format!("/beneficiaries/{}", id), input)
    }

    pub fn delete_beneficiary(&self, id: &str) -> Result<BeneficiaryResponse> {
        self.client.delete(&format!("/beneficiaries/{}", id))
    }
}
