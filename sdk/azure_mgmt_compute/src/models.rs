//! Virtual machine image models.

use azure_rest_core::error::AzureResult;
use azure_rest_core::xml::{FromXml, XmlElement};
use chrono::{DateTime, Utc};

/// Operating system disk of a VM image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OSDiskConfiguration {
    pub name: Option<String>,
    /// `None`, `ReadOnly` or `ReadWrite`.
    pub host_caching: Option<String>,
    /// `Generalized` or `Specialized`.
    pub os_state: Option<String>,
    /// `Linux` or `Windows`.
    pub operating_system: Option<String>,
    pub media_link: Option<String>,
    pub logical_disk_size_in_gb: Option<u32>,
}

impl FromXml for OSDiskConfiguration {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            name: element.child_text("Name"),
            host_caching: element.child_text("HostCaching"),
            os_state: element.child_text("OSState"),
            operating_system: element.child_text("OS"),
            media_link: element.child_text("MediaLink"),
            logical_disk_size_in_gb: element.child_parse("LogicalDiskSizeInGB")?,
        })
    }
}

/// Data disk of a VM image.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataDiskConfiguration {
    pub name: Option<String>,
    pub host_caching: Option<String>,
    pub logical_unit_number: Option<u32>,
    pub media_link: Option<String>,
    pub logical_disk_size_in_gb: Option<u32>,
}

impl FromXml for DataDiskConfiguration {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            name: element.child_text("Name"),
            host_caching: element.child_text("HostCaching"),
            logical_unit_number: element.child_parse("Lun")?,
            media_link: element.child_text("MediaLink"),
            logical_disk_size_in_gb: element.child_parse("LogicalDiskSizeInGB")?,
        })
    }
}

/// A VM image available to the subscription (user captured or published).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VirtualMachineVMImage {
    pub name: Option<String>,
    pub label: Option<String>,
    /// `User` for captured images, otherwise the publisher category.
    pub category: Option<String>,
    pub description: Option<String>,
    pub os_disk_configuration: Option<OSDiskConfiguration>,
    pub data_disk_configurations: Vec<DataDiskConfiguration>,
    pub service_name: Option<String>,
    pub deployment_name: Option<String>,
    pub role_name: Option<String>,
    pub location: Option<String>,
    pub affinity_group: Option<String>,
    pub created_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
    pub language: Option<String>,
    pub image_family: Option<String>,
    pub recommended_vm_size: Option<String>,
    pub is_premium: Option<bool>,
    pub eula: Option<String>,
    pub icon_uri: Option<String>,
    pub small_icon_uri: Option<String>,
    pub privacy_uri: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
}

impl FromXml for VirtualMachineVMImage {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            name: element.child_text("Name"),
            label: element.child_text("Label"),
            category: element.child_text("Category"),
            description: element.child_text("Description"),
            os_disk_configuration: element
                .child("OSDiskConfiguration")
                .filter(|e| !e.is_nil())
                .map(OSDiskConfiguration::from_xml)
                .transpose()?,
            data_disk_configurations: element
                .child_list("DataDiskConfigurations", "DataDiskConfiguration")?,
            service_name: element.child_text("ServiceName"),
            deployment_name: element.child_text("DeploymentName"),
            role_name: element.child_text("RoleName"),
            location: element.child_text("Location"),
            affinity_group: element.child_text("AffinityGroup"),
            created_time: element.child_datetime("CreatedTime")?,
            modified_time: element.child_datetime("ModifiedTime")?,
            language: element.child_text("Language"),
            image_family: element.child_text("ImageFamily"),
            recommended_vm_size: element.child_text("RecommendedVMSize"),
            is_premium: element.child_bool("IsPremium")?,
            eula: element.child_text("Eula"),
            icon_uri: element.child_text("IconUri"),
            small_icon_uri: element.child_text("SmallIconUri"),
            privacy_uri: element.child_text("PrivacyUri"),
            published_date: element.child_datetime("PublishedDate")?,
        })
    }
}

/// Response of listing VM images.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VirtualMachineVMImageList {
    pub vm_images: Vec<VirtualMachineVMImage>,
}

impl FromXml for VirtualMachineVMImageList {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            vm_images: element
                .children_named("VMImage")
                .map(VirtualMachineVMImage::from_xml)
                .collect::<AzureResult<_>>()?,
        })
    }
}
