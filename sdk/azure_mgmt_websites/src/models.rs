//! Web site metrics models.

use azure_rest_core::error::{AzureError, AzureResult};
use azure_rest_core::xml::{FromXml, XmlElement};
use chrono::{DateTime, Utc};

/// Parameters for [`crate::web_site::get_historical_usage_metrics`].
///
/// All fields are optional: without metric names every available metric is
/// returned; without a start time the beginning of the current hour is used;
/// without an end time the current time is used.
///
/// # Example
///
/// ```
/// use azure_mgmt_websites::models::WebSiteGetHistoricalUsageMetricsParameters;
///
/// let params = WebSiteGetHistoricalUsageMetricsParameters::builder()
///     .metric_name("CpuTime")
///     .metric_name("Requests")
///     .build()
///     .unwrap();
/// assert_eq!(params.metric_names, vec!["CpuTime", "Requests"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WebSiteGetHistoricalUsageMetricsParameters {
    pub end_time: Option<DateTime<Utc>>,
    pub metric_names: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
}

impl WebSiteGetHistoricalUsageMetricsParameters {
    /// Create a new builder.
    pub fn builder() -> WebSiteGetHistoricalUsageMetricsParametersBuilder {
        WebSiteGetHistoricalUsageMetricsParametersBuilder::default()
    }
}

/// Builder for [`WebSiteGetHistoricalUsageMetricsParameters`].
#[derive(Debug, Default)]
pub struct WebSiteGetHistoricalUsageMetricsParametersBuilder {
    end_time: Option<DateTime<Utc>>,
    metric_names: Vec<String>,
    start_time: Option<DateTime<Utc>>,
}

impl WebSiteGetHistoricalUsageMetricsParametersBuilder {
    /// Add one metric name, e.g. `CpuTime`.
    pub fn metric_name(mut self, name: impl Into<String>) -> Self {
        self.metric_names.push(name.into());
        self
    }

    /// Replace the metric names.
    pub fn metric_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metric_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn end_time(mut self, end_time: DateTime<Utc>) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Build the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric name is empty or the start time is after
    /// the end time.
    pub fn build(self) -> AzureResult<WebSiteGetHistoricalUsageMetricsParameters> {
        if self.metric_names.iter().any(|n| n.trim().is_empty()) {
            return Err(AzureError::InvalidArgument(
                "metric names cannot be empty".into(),
            ));
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start > end {
                return Err(AzureError::InvalidArgument(
                    "start_time must not be after end_time".into(),
                ));
            }
        }
        Ok(WebSiteGetHistoricalUsageMetricsParameters {
            end_time: self.end_time,
            metric_names: self.metric_names,
            start_time: self.start_time,
        })
    }
}

/// One aggregated sample of a metric.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WebSiteMetricSample {
    pub count: Option<i64>,
    pub instance_name: Option<String>,
    pub maximum: Option<f64>,
    pub minimum: Option<f64>,
    pub time_created: Option<DateTime<Utc>>,
    pub total: Option<f64>,
}

impl FromXml for WebSiteMetricSample {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            count: element.child_parse("Count")?,
            instance_name: element.child_text("InstanceName"),
            maximum: element.child_parse("Maximum")?,
            minimum: element.child_parse("Minimum")?,
            time_created: element.child_datetime("TimeCreated")?,
            total: element.child_parse("Total")?,
        })
    }
}

/// Historical values of one metric.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WebSiteMetricSet {
    pub display_name: Option<String>,
    pub end_time: Option<DateTime<Utc>>,
    pub name: Option<String>,
    /// `Average`, `Total`, `Minimum` or `Maximum`.
    pub primary_aggregation_type: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    /// ISO-8601 duration, e.g. `PT1H`.
    pub time_grain: Option<String>,
    pub unit: Option<String>,
    pub values: Vec<WebSiteMetricSample>,
}

impl FromXml for WebSiteMetricSet {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            display_name: element.child_text("DisplayName"),
            end_time: element.child_datetime("EndTime")?,
            name: element.child_text("Name"),
            primary_aggregation_type: element.child_text("PrimaryAggregationType"),
            start_time: element.child_datetime("StartTime")?,
            time_grain: element.child_text("TimeGrain"),
            unit: element.child_text("Unit"),
            values: element.child_list("Values", "MetricSample")?,
        })
    }
}

/// Result for one requested metric.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WebSiteMetricResponse {
    /// `Success` when data was returned.
    pub code: Option<String>,
    pub data: Option<WebSiteMetricSet>,
    pub message: Option<String>,
}

impl FromXml for WebSiteMetricResponse {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            code: element.child_text("Code"),
            data: element
                .child("Data")
                .filter(|d| !d.is_nil())
                .map(WebSiteMetricSet::from_xml)
                .transpose()?,
            message: element.child_text("Message"),
        })
    }
}

/// Response of [`crate::web_site::get_historical_usage_metrics`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WebSiteGetHistoricalUsageMetricsResult {
    pub usage_metrics: Vec<WebSiteMetricResponse>,
}

impl FromXml for WebSiteGetHistoricalUsageMetricsResult {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            usage_metrics: element
                .children_named("MetricResponse")
                .map(WebSiteMetricResponse::from_xml)
                .collect::<AzureResult<_>>()?,
        })
    }
}
