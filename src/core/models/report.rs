use serde::{Deserialize, Serialize};

use crate::core::models::timestamp::Timestamp;

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

/// Top-level envelope: the reporting window plus both cost breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    #[serde(rename = "report")]
    pub metadata: CostReportMetadata,
    pub evergreen: EvergreenCost,
    #[serde(default)]
    pub providers: Vec<CloudProvider>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostReportMetadata {
    pub generated: Timestamp,
    pub begin: Timestamp,
    pub end: Timestamp,
}

/// A provider reports either an aggregate `cost` or a per-account breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudProvider {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<CloudAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudAccount {
    pub name: String,
    #[serde(default)]
    pub services: Vec<AccountService>,
}

/// Same shape as [`CloudProvider`]: flat `cost` or itemized `items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountService {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ServiceItem>,
}

/// One instance type / purchase option combination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub name: String,
    pub item_type: String,
    pub launched: i64,
    pub terminated: i64,
    pub avg_price: f64,
    pub avg_uptime: f64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvergreenCost {
    #[serde(default)]
    pub projects: Vec<EvergreenProjectCost>,
    #[serde(default)]
    pub distros: Vec<EvergreenDistroCost>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvergreenProjectCost {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<EvergreenTaskCost>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvergreenTaskCost {
    pub githash: String,
    pub name: String,
    pub distro: String,
    pub build_variant: String,
    pub task_seconds: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvergreenDistroCost {
    pub name: String,
    pub provider: String,
    pub instance_type: String,
    pub instance_seconds: f64,
}

/// How a provider or service expresses its cost.
///
/// The stored records allow both `cost` and a breakdown to be set at once.
/// A non-empty breakdown takes precedence and the flat amount is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Breakdown<'a, T> {
    Flat(f64),
    Itemized(&'a [T]),
}

impl CostReport {
    /// Sum of every provider's cost.
    pub fn cloud_total(&self) -> f64 {
        self.providers.iter().map(CloudProvider::total).sum()
    }
}

impl CloudProvider {
    pub fn flat(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            cost,
            accounts: Vec::new(),
        }
    }

    pub fn with_accounts(name: impl Into<String>, accounts: Vec<CloudAccount>) -> Self {
        Self {
            name: name.into(),
            cost: 0.0,
            accounts,
        }
    }

    pub fn breakdown(&self) -> Breakdown<'_, CloudAccount> {
        if self.accounts.is_empty() {
            Breakdown::Flat(self.cost)
        } else {
            Breakdown::Itemized(&self.accounts)
        }
    }

    pub fn total(&self) -> f64 {
        match self.breakdown() {
            Breakdown::Flat(cost) => cost,
            Breakdown::Itemized(accounts) => accounts.iter().map(CloudAccount::total).sum(),
        }
    }
}

impl CloudAccount {
    pub fn total(&self) -> f64 {
        self.services.iter().map(AccountService::total).sum()
    }
}

impl AccountService {
    pub fn flat(name: impl Into<String>, cost: f64) -> Self {
        Self {
            name: name.into(),
            cost,
            items: Vec::new(),
        }
    }

    pub fn itemized(name: impl Into<String>, items: Vec<ServiceItem>) -> Self {
        Self {
            name: name.into(),
            cost: 0.0,
            items,
        }
    }

    pub fn breakdown(&self) -> Breakdown<'_, ServiceItem> {
        if self.items.is_empty() {
            Breakdown::Flat(self.cost)
        } else {
            Breakdown::Itemized(&self.items)
        }
    }

    pub fn total(&self) -> f64 {
        match self.breakdown() {
            Breakdown::Flat(cost) => cost,
            Breakdown::Itemized(items) => items.iter().map(ServiceItem::total).sum(),
        }
    }
}

impl ServiceItem {
    /// Average hourly price times billed hours.
    pub fn total(&self) -> f64 {
        self.avg_price * self.total_hours
    }
}

impl EvergreenProjectCost {
    pub fn task_seconds(&self) -> f64 {
        self.tasks.iter().map(|t| t.task_seconds).sum()
    }
}

impl EvergreenCost {
    pub fn task_seconds(&self) -> f64 {
        self.projects.iter().map(EvergreenProjectCost::task_seconds).sum()
    }

    pub fn instance_seconds(&self) -> f64 {
        self.distros.iter().map(|d| d.instance_seconds).sum()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// The kernel-build / macstadium report used across the crate's tests.
    pub(crate) fn fixture() -> CostReport {
        let item = ServiceItem {
            name: "c3.4xlarge".into(),
            item_type: "spot".into(),
            launched: 12,
            terminated: 1,
            avg_price: 0.704,
            avg_uptime: 1.62,
            total_hours: 23.0,
        };

        let account = CloudAccount {
            name: "kernel-build".into(),
            services: vec![
                AccountService::itemized("ec2", vec![item]),
                AccountService::flat("ebs", 5000.0),
                AccountService::flat("s3", 5000.0),
            ],
        };

        let task = EvergreenTaskCost {
            githash: "c609be45647fce98d0394221efc5d362ac470b64".into(),
            name: "compile".into(),
            distro: "ubuntu1604-build".into(),
            build_variant: "x...".into(),
            task_seconds: 1242.0,
        };

        CostReport {
            metadata: CostReportMetadata {
                generated: Timestamp::parse("2017-05-23T12:11:10.123").unwrap(),
                begin: Timestamp::parse("2017-05-23T17:00:00.000").unwrap(),
                end: Timestamp::parse("2017-05-23T17:12:00.000").unwrap(),
            },
            evergreen: EvergreenCost {
                projects: vec![EvergreenProjectCost {
                    name: "mongodb-mongo-master".into(),
                    tasks: vec![task],
                }],
                distros: vec![EvergreenDistroCost {
                    name: "ubuntu1604-build".into(),
                    provider: "ec2".into(),
                    instance_type: "c3.4xlarge".into(),
                    instance_seconds: 12.0,
                }],
            },
            providers: vec![
                CloudProvider::with_accounts("aws", vec![account]),
                CloudProvider::flat("macstadium", 27.12),
            ],
        }
    }

    #[test]
    fn wire_keys_are_fixed() {
        let json = serde_json::to_value(fixture()).unwrap();
        assert!(json.get("report").is_some());
        assert!(json["report"].get("generated").is_some());
        let item = &json["providers"][0]["accounts"][0]["services"][0]["items"][0];
        for key in ["name", "itemType", "launched", "terminated", "avgPrice", "avgUptime", "totalHours"] {
            assert!(item.get(key).is_some(), "missing key {}", key);
        }
        let task = &json["evergreen"]["projects"][0]["tasks"][0];
        assert_eq!(task["buildVariant"], "x...");
        assert_eq!(task["taskSeconds"], 1242.0);
        let distro = &json["evergreen"]["distros"][0];
        assert_eq!(distro["instanceType"], "c3.4xlarge");
        assert_eq!(distro["instanceSeconds"], 12.0);
    }

    #[test]
    fn flat_provider_omits_accounts() {
        let json = serde_json::to_value(CloudProvider::flat("macstadium", 27.12)).unwrap();
        assert_eq!(json, serde_json::json!({"name": "macstadium", "cost": 27.12}));
    }

    #[test]
    fn itemized_service_omits_zero_cost() {
        let json = serde_json::to_value(&fixture().providers[0].accounts[0].services[0]).unwrap();
        assert!(json.get("cost").is_none());
        assert_eq!(json["items"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn breakdown_prefers_items() {
        let mut service = AccountService::flat("ec2", 10.0);
        assert_eq!(service.breakdown(), Breakdown::Flat(10.0));
        service.items.push(ServiceItem {
            avg_price: 2.0,
            total_hours: 3.0,
            ..Default::default()
        });
        assert!(matches!(service.breakdown(), Breakdown::Itemized(items) if items.len() == 1));
        assert_eq!(service.total(), 6.0);
    }

    #[test]
    fn provider_totals() {
        let report = fixture();
        let aws = report.providers[0].total();
        assert!((aws - (0.704 * 23.0 + 10_000.0)).abs() < 1e-9);
        assert_eq!(report.providers[1].total(), 27.12);
        assert!((report.cloud_total() - (aws + 27.12)).abs() < 1e-9);
    }

    #[test]
    fn evergreen_seconds() {
        let report = fixture();
        assert_eq!(report.evergreen.task_seconds(), 1242.0);
        assert_eq!(report.evergreen.instance_seconds(), 12.0);
    }

    #[test]
    fn default_report_is_all_zero() {
        let report = CostReport::default();
        assert!(report.providers.is_empty());
        assert!(report.evergreen.projects.is_empty());
        assert_eq!(report.cloud_total(), 0.0);
    }
}
