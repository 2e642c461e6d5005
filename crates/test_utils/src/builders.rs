//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.
//!
//! The default client is a domestic monthly account billed hourly on day 1
//! with flat bank charges, the configuration most computation-chain tests
//! start from.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClientId, Money, UserId};
use domain_billing::{BillingContext, BillingLevel, ProjectBillingDetail};
use domain_client::{
    BillingFrequency, Client, ClientBillingDetails, CountryCode, ServiceRateTerm,
};
use domain_project::{Designation, EffortEntry, EffortLog, Project, ProjectType, TeamMember};

use crate::fixtures::{MoneyFixtures, StringFixtures, TemporalFixtures};

/// Builder for constructing test clients
pub struct TestClientBuilder {
    name: String,
    country: CountryCode,
    frequency: BillingFrequency,
    billing_day: u32,
    service_rate: Money,
    service_rate_term: Option<ServiceRateTerm>,
    bank_charges: Option<Money>,
    last_marked_active_on: Option<NaiveDate>,
}

impl Default for TestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClientBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            name: StringFixtures::client_name(),
            country: CountryCode::new("IN"),
            frequency: BillingFrequency::Monthly,
            billing_day: 1,
            service_rate: MoneyFixtures::inr_hourly_rate(),
            service_rate_term: Some(ServiceRateTerm::PerHour),
            bank_charges: Some(MoneyFixtures::inr_bank_charges()),
            last_marked_active_on: None,
        }
    }

    /// Switches to an overseas monthly-retainer configuration
    pub fn overseas(mut self) -> Self {
        self.country = CountryCode::new("US");
        self.service_rate = MoneyFixtures::usd_monthly_rate();
        self.service_rate_term = Some(ServiceRateTerm::PerMonth);
        self.bank_charges = None;
        self
    }

    /// Sets the client name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the country
    pub fn with_country(mut self, code: &str) -> Self {
        self.country = CountryCode::new(code);
        self
    }

    /// Sets the billing frequency
    pub fn with_frequency(mut self, frequency: BillingFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the billing day
    pub fn with_billing_day(mut self, day: u32) -> Self {
        self.billing_day = day;
        self
    }

    /// Sets the service rate
    pub fn with_service_rate(mut self, rate: Money) -> Self {
        self.service_rate = rate;
        self
    }

    /// Sets the rate term
    pub fn with_rate_term(mut self, term: ServiceRateTerm) -> Self {
        self.service_rate_term = Some(term);
        self
    }

    /// Clears the rate term
    pub fn without_rate_term(mut self) -> Self {
        self.service_rate_term = None;
        self
    }

    /// Sets the bank charges
    pub fn with_bank_charges(mut self, charges: Money) -> Self {
        self.bank_charges = Some(charges);
        self
    }

    /// Clears the bank charges
    pub fn without_bank_charges(mut self) -> Self {
        self.bank_charges = None;
        self
    }

    /// Sets the last-marked-active date
    pub fn with_last_marked_active(mut self, date: NaiveDate) -> Self {
        self.last_marked_active_on = Some(date);
        self
    }

    /// Builds the client with billing details attached
    pub fn build(self) -> Client {
        let mut details =
            ClientBillingDetails::new(self.frequency, self.billing_day, self.service_rate)
                .expect("valid billing details");
        if let Some(term) = self.service_rate_term {
            details = details.with_rate_term(term);
        }
        if let Some(charges) = self.bank_charges {
            details = details
                .with_bank_charges(charges)
                .expect("bank charges in the rate currency");
        }

        let mut client = Client::new(self.name, self.country).with_billing_details(details);
        if let Some(date) = self.last_marked_active_on {
            client = client.with_last_marked_active(date);
        }
        client
    }

    /// Builds a client that has no billing configuration yet
    pub fn build_without_billing(self) -> Client {
        Client::new(self.name, self.country)
    }
}

/// Builder for constructing test roster entries
pub struct TestTeamMemberBuilder {
    user_id: UserId,
    designation: Designation,
    daily_expected_effort: Decimal,
    billing_engagement: Decimal,
    started_on: NaiveDate,
    ended_on: Option<NaiveDate>,
    effort: Vec<(NaiveDate, Decimal)>,
}

impl Default for TestTeamMemberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTeamMemberBuilder {
    /// Creates a new builder for a full-time developer
    pub fn new() -> Self {
        Self {
            user_id: UserId::new(),
            designation: Designation::Developer,
            daily_expected_effort: dec!(8),
            billing_engagement: dec!(100),
            started_on: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ended_on: None,
            effort: Vec::new(),
        }
    }

    /// Sets the designation
    pub fn with_designation(mut self, designation: Designation) -> Self {
        self.designation = designation;
        self
    }

    /// Sets the expected daily effort in hours
    pub fn with_daily_effort(mut self, hours: Decimal) -> Self {
        self.daily_expected_effort = hours;
        self
    }

    /// Sets the billing engagement percentage
    pub fn with_engagement(mut self, percent: Decimal) -> Self {
        self.billing_engagement = percent;
        self
    }

    /// Sets the membership start date
    pub fn started_on(mut self, date: NaiveDate) -> Self {
        self.started_on = date;
        self
    }

    /// Closes the membership on the given date
    pub fn ended_on(mut self, date: NaiveDate) -> Self {
        self.ended_on = Some(date);
        self
    }

    /// Logs one effort record
    pub fn with_effort_on(mut self, date: NaiveDate, hours: Decimal) -> Self {
        self.effort.push((date, hours));
        self
    }

    /// Logs the same hours on each of the given days
    pub fn with_effort_through(mut self, days: &[NaiveDate], hours: Decimal) -> Self {
        for day in days {
            self.effort.push((*day, hours));
        }
        self
    }

    /// Builds the roster entry
    pub fn build(self) -> TeamMember {
        let mut member = TeamMember::new(
            self.user_id,
            self.designation,
            self.daily_expected_effort,
            self.billing_engagement,
            self.started_on,
        )
        .expect("valid roster entry");

        if let Some(date) = self.ended_on {
            member.end_on(date).expect("end date after start");
        }
        if !self.effort.is_empty() {
            let entries = self
                .effort
                .into_iter()
                .map(|(date, hours)| EffortEntry::new(date, hours))
                .collect();
            member = member.with_effort_log(EffortLog::new(entries));
        }
        member
    }
}

/// Builder for constructing test projects
pub struct TestProjectBuilder {
    client_id: ClientId,
    name: String,
    project_type: ProjectType,
    is_amc: bool,
    team: Vec<TeamMember>,
    created_at: DateTime<Utc>,
}

impl Default for TestProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProjectBuilder {
    /// Creates a new builder for an active monthly project
    pub fn new() -> Self {
        Self {
            client_id: ClientId::new(),
            name: StringFixtures::project_name(),
            project_type: ProjectType::Monthly,
            is_amc: false,
            team: Vec::new(),
            created_at: TemporalFixtures::project_created(),
        }
    }

    /// Bills the project to the given client
    pub fn for_client(mut self, client: &Client) -> Self {
        self.client_id = client.id;
        self
    }

    /// Sets the client id directly
    pub fn with_client_id(mut self, id: ClientId) -> Self {
        self.client_id = id;
        self
    }

    /// Sets the project name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Switches to a fixed-budget engagement
    pub fn fixed_budget(mut self) -> Self {
        self.project_type = ProjectType::FixedBudget;
        self
    }

    /// Flags the project as an annual maintenance contract
    pub fn as_amc(mut self) -> Self {
        self.is_amc = true;
        self
    }

    /// Adds a roster entry
    pub fn with_member(mut self, member: TeamMember) -> Self {
        self.team.push(member);
        self
    }

    /// Sets the full roster
    pub fn with_team(mut self, team: Vec<TeamMember>) -> Self {
        self.team = team;
        self
    }

    /// Sets the creation instant, the billing anchor before any invoice
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Builds the project
    pub fn build(self) -> Project {
        let mut project = Project::new(self.client_id, self.name, self.project_type)
            .with_created_at(self.created_at)
            .with_team(self.team);
        if self.is_amc {
            project = project.as_amc();
        }
        project
    }
}

/// Builder for a full billing context
///
/// A provided project keeps its own client id; when only a client is given
/// the generated project is billed to it.
pub struct TestBillingContextBuilder {
    client: Option<Client>,
    project: Option<Project>,
    billing_detail: Option<ProjectBillingDetail>,
    billing_level: BillingLevel,
}

impl Default for TestBillingContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBillingContextBuilder {
    /// Creates a new builder defaulting to project-level invoicing
    pub fn new() -> Self {
        Self {
            client: None,
            project: None,
            billing_detail: None,
            billing_level: BillingLevel::Project,
        }
    }

    /// Sets the client
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the project
    pub fn with_project(mut self, project: Project) -> Self {
        self.project = Some(project);
        self
    }

    /// Attaches a project billing override row
    pub fn with_override(mut self, detail: ProjectBillingDetail) -> Self {
        self.billing_detail = Some(detail);
        self
    }

    /// Switches to client-level invoicing
    pub fn client_level(mut self) -> Self {
        self.billing_level = BillingLevel::Client;
        self
    }

    /// Builds the context
    pub fn build(self) -> BillingContext {
        let client = self.client.unwrap_or_else(|| TestClientBuilder::new().build());
        let project = self
            .project
            .unwrap_or_else(|| TestProjectBuilder::new().with_client_id(client.id).build());

        BillingContext {
            project,
            client,
            billing_detail: self.billing_detail,
            billing_level: self.billing_level,
        }
    }
}
