//! Beneficiary store - the saved recipients list

use crate::domain::responses::BeneficiaryResponse;
use crate::domain::result::Result;
use crate::domain::{Beneficiary, BeneficiaryInput};
use crate::services::BeneficiaryService;

use super::ActionState;

/// Ordered list of beneficiaries as last confirmed by the server
pub struct BeneficiaryStore {
    service: BeneficiaryService,
    beneficiaries: Vec<Beneficiary>,
    state: ActionState,
}

impl BeneficiaryStore {
    pub fn new(service: BeneficiaryService) -> Self {
        Self {
            service,
            beneficiaries: Vec::new(),
            state: ActionState::default(),
        }
    }

    /// Replace the list with the server's; a missing list means empty
    pub fn fetch_beneficiaries(&mut self) -> Result<&[Beneficiary]> {
        self.state.begin();
        let result = self.service.get_all_beneficiaries();
        let response = self.state.finish(result, "Failed to fetch beneficiaries")?;
        self.beneficiaries = response.beneficiaries.unwrap_or_default();
        Ok(&self.beneficiaries)
    }

    /// Create a beneficiary and append the server's record, if it sent one
    pub fn add_beneficiary(&mut self, input: &BeneficiaryInput) -> Result<BeneficiaryResponse> {
        self.state.begin();
        let result = self.service.add_beneficiary(input);
        let response = self.state.finish(result, "Failed to add beneficiary")?;
        if let Some(beneficiary) = &response.beneficiary {
            self.beneficiaries.push(beneficiary.clone());
        }
        Ok(response)
    }

    /// Update a beneficiary and replace it in place.
    ///
    /// Nothing changes locally when `id` is not in the loaded list or the
    /// response carries no record; the server call still counts.
    pub fn update_beneficiary(
        &mut self,
        id: &str,
        input: &BeneficiaryInput,
    ) -> Result<BeneficiaryResponse> {
        self.state.begin();
        let result = self.service.update_beneficiary(id, input);
        let response = self.state.finish(result, "Failed to update beneficiary")?;
        if let Some(updated) = &response.beneficiary {
            if let Some(slot) = self.beneficiaries.iter_mut().find(|b| b.id == id) {
                *slot = updated.clone();
            }
        }
        Ok(response)
    }

    /// Delete a beneficiary; removed locally once the server accepts
    pub fn delete_beneficiary(&mut self, id: &str) -> Result<()> {
        self.state.begin();
        let result = self.service.delete_beneficiary(id);
        self.state.finish(result, "Failed to delete beneficiary")?;
        self.beneficiaries.retain(|b| b.id != id);
        Ok(())
    }

    pub fn get_beneficiary_by_id(&self, id: &str) -> Option<&Beneficiary> {
        self.beneficiaries.iter().find(|b| b.id == id)
    }

    pub fn beneficiaries(&self) -> &[Beneficiary] {
        &self.beneficiaries
    }

    pub fn beneficiaries_count(&self) -> usize {
        self.beneficiaries.len()
    }

    /// Forget the loaded list, e.g. after sign-out
    pub fn clear_beneficiaries(&mut self) {
        self.beneficiaries.clear();
        self.state = ActionState::default();
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }
}
