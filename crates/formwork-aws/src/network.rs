//! Network resource manager (VPCs, subnets)

use crate::environment::Environment;
use crate::error::Result;
use formwork_core::model::Blueprint;
use formwork_core::{NamingContext, merge, resolve};
use formwork_synth::logical_id::camel_case;
use formwork_synth::{Output, Resource, Stack, reference};
use serde_json::{Value, json};
use tracing::debug;

/// Manager for network resources
pub struct NetworkManager<'a> {
    naming: &'a NamingContext,
    environment: &'a Environment,
}

impl<'a> NetworkManager<'a> {
    pub fn new(naming: &'a NamingContext, environment: &'a Environment) -> Self {
        Self {
            naming,
            environment,
        }
    }

    /// Declare a VPC and its subnets from the `vpcs` collection
    ///
    /// Registers an output for the VPC id and one per subnet id.
    pub fn add_vpc(&self, stack: &mut Stack, blueprint: &Blueprint, key: &str) -> Result<String> {
        let entry = resolve(blueprint.vpcs.as_deref(), "vpcs", key)?;
        let vpc_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);

        let defaults = json!({
            "CidrBlock": entry.cidr,
            "EnableDnsSupport": entry.enable_dns,
            "EnableDnsHostnames": entry.enable_dns,
            "Tags": self.tags_with_name(&vpc_name),
        });
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let vpc_logical = camel_case(&format!("{}-vpc", entry.key));
        debug!(key = %entry.key, name = %vpc_name, "Declaring VPC");
        stack.add_resource(&vpc_logical, Resource::new("AWS::EC2::VPC", properties))?;

        stack.add_output(Output::new(
            format!("{}-vpc-id", entry.key),
            reference(&vpc_logical),
        ))?;

        for subnet in &entry.subnets {
            let subnet_name = self.naming.resource_name(&subnet.name);
            let mut subnet_properties = json!({
                "VpcId": reference(&vpc_logical),
                "CidrBlock": subnet.cidr,
                "MapPublicIpOnLaunch": subnet.public,
                "Tags": self.tags_with_name(&subnet_name),
            });
            if let Some(zone) = &subnet.availability_zone {
                subnet_properties["AvailabilityZone"] = json!(zone);
            }

            let subnet_logical = camel_case(&format!("{}-{}-subnet", entry.key, subnet.name));
            stack.add_resource(
                &subnet_logical,
                Resource::new("AWS::EC2::Subnet", subnet_properties)
                    .with_dependency(vpc_logical.clone()),
            )?;

            stack.add_output(Output::new(
                format!("{}-{}-subnet-id", entry.key, subnet.name),
                reference(&subnet_logical),
            ))?;
        }

        Ok(vpc_logical)
    }

    /// Default tags plus a Name tag, the way the console expects
    fn tags_with_name(&self, name: &str) -> serde_json::Value {
        let mut tags = self
            .environment
            .default_tags(self.naming)
            .as_array()
            .cloned()
            .unwrap_or_default();
        tags.push(json!({"Key": "Name", "Value": name}));
        json!(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::model::{SubnetConfig, VpcConfig};

    #[test]
    fn test_add_vpc_declares_subnets_and_outputs() {
        let naming = NamingContext::new("media-stack", "dev").unwrap();
        let environment = Environment::default();
        let manager = NetworkManager::new(&naming, &environment);

        let blueprint = Blueprint {
            vpcs: Some(vec![VpcConfig {
                key: "main".to_string(),
                name: "media-vpc".to_string(),
                skip_stage_suffix: false,
                cidr: "10.0.0.0/16".to_string(),
                enable_dns: true,
                subnets: vec![
                    SubnetConfig {
                        name: "public-a".to_string(),
                        cidr: "10.0.1.0/24".to_string(),
                        public: true,
                        availability_zone: Some("ap-northeast-1a".to_string()),
                    },
                    SubnetConfig {
                        name: "private-a".to_string(),
                        cidr: "10.0.2.0/24".to_string(),
                        public: false,
                        availability_zone: None,
                    },
                ],
                extra: serde_json::Map::new(),
            }]),
            ..Default::default()
        };

        let mut stack = Stack::new("media-stack");
        let logical = manager.add_vpc(&mut stack, &blueprint, "main").unwrap();
        assert_eq!(logical, "mainVpc");

        assert_eq!(stack.resources().len(), 3);
        let subnet = &stack.resources()["mainPublicASubnet"];
        assert_eq!(subnet.properties["VpcId"], json!({"Ref": "mainVpc"}));
        assert_eq!(subnet.properties["MapPublicIpOnLaunch"], true);
        assert_eq!(subnet.properties["AvailabilityZone"], "ap-northeast-1a");

        assert!(stack.outputs().contains_key("mainVpcId"));
        assert!(stack.outputs().contains_key("mainPublicASubnetId"));
        assert!(stack.outputs().contains_key("mainPrivateASubnetId"));
    }
}
