//! Compliance check results

use chrono::{DateTime, Utc};

use crate::enums::{PbmComplianceResultComplianceTaskStatus, PbmComplianceStatus};
use crate::error::Result;
use crate::types::capability::PbmCapabilityInstance;
use crate::types::profile::PbmProfileId;
use crate::types::service::{PbmExtendedElementDescription, PbmServerObjectRef};
use crate::vim::LocalizedMethodFault;

pbm_type! {
    /// Progress of an operation that brings an entity into compliance
    PbmComplianceOperationalStatus {
        /// Whether the entity is healthy
        healthy: opt bool => "healthy",
        /// Estimated completion time
        operation_eta: opt DateTime<Utc> => "operationETA",
        /// Percent complete
        operation_progress: opt i64 => "operationProgress",
        /// Whether the entity is changing state
        transitional: opt bool => "transitional",
    }
}

pbm_type! {
    /// Expected and current value of a violated capability
    PbmCompliancePolicyStatus {
        /// What the profile requires
        expected_value: req PbmCapabilityInstance => "expectedValue",
        /// What the entity has
        current_value: opt PbmCapabilityInstance => "currentValue",
    }
}

pbm_type! {
    /// Compliance of one entity with its profile
    PbmComplianceResult {
        /// When the check ran
        check_time: req DateTime<Utc> => "checkTime",
        /// The entity
        entity: req PbmServerObjectRef => "entity",
        /// Profile checked against
        profile: opt PbmProfileId => "profile",
        /// A `PbmComplianceResultComplianceTaskStatus` token
        compliance_task_status: opt String => "complianceTaskStatus",
        /// A `PbmComplianceStatus` token
        compliance_status: req String => "complianceStatus",
        /// Whether the associated profile differs from the one checked
        mismatch: req bool => "mismatch",
        /// Violated capabilities
        violated_policies: vec PbmCompliancePolicyStatus => "violatedPolicies",
        /// Why the check could not complete
        error_cause: vec LocalizedMethodFault => "errorCause",
        /// Progress of remediation
        operational_status: opt PbmComplianceOperationalStatus => "operationalStatus",
        /// Additional information
        info: opt PbmExtendedElementDescription => "info",
    }
}

impl PbmComplianceResult {
    /// Parse [`Self::compliance_status`]
    pub fn status(&self) -> Result<PbmComplianceStatus> {
        PbmComplianceStatus::from_value(&self.compliance_status)
    }

    /// Parse [`Self::compliance_task_status`]
    pub fn task_status(&self) -> Option<Result<PbmComplianceResultComplianceTaskStatus>> {
        self.compliance_task_status
            .as_deref()
            .map(PbmComplianceResultComplianceTaskStatus::from_value)
    }

    /// Whether the entity is compliant
    pub fn is_compliant(&self) -> bool {
        matches!(self.status(), Ok(PbmComplianceStatus::Compliant))
    }
}

pbm_type! {
    /// Compliance of a virtual machine and all its disks
    PbmRollupComplianceResult {
        /// Oldest check time among the results
        oldest_check_time: req DateTime<Utc> => "oldestCheckTime",
        /// The virtual machine
        entity: req PbmServerObjectRef => "entity",
        /// A `PbmComplianceStatus` token for the whole entity
        overall_compliance_status: req String => "overallComplianceStatus",
        /// A `PbmComplianceResultComplianceTaskStatus` token
        overall_compliance_task_status: opt String => "overallComplianceTaskStatus",
        /// Per-object results
        result: vec PbmComplianceResult => "result",
        /// Why the check could not complete
        error_cause: vec LocalizedMethodFault => "errorCause",
        /// Whether any object's profile differs from the one checked
        profile_mismatch: req bool => "profileMismatch",
    }
}

impl PbmRollupComplianceResult {
    /// Parse [`Self::overall_compliance_status`]
    pub fn overall_status(&self) -> Result<PbmComplianceStatus> {
        PbmComplianceStatus::from_value(&self.overall_compliance_status)
    }

    /// Parse [`Self::overall_compliance_task_status`]
    pub fn overall_task_status(&self) -> Option<Result<PbmComplianceResultComplianceTaskStatus>> {
        self.overall_compliance_task_status
            .as_deref()
            .map(PbmComplianceResultComplianceTaskStatus::from_value)
    }

    /// Results that are not compliant
    pub fn violations(&self) -> impl Iterator<Item = &PbmComplianceResult> {
        self.result.iter().filter(|r| !r.is_compliant())
    }
}
