//! API and custom domain managers

use crate::environment::Environment;
use crate::error::Result;
use formwork_core::model::Blueprint;
use formwork_core::{NamingContext, merge, resolve};
use formwork_synth::logical_id::camel_case;
use formwork_synth::{Output, Resource, Stack, get_att, reference};
use serde_json::{Value, json};
use tracing::debug;

/// Manager for HTTP APIs and their custom domains
pub struct ApiManager<'a> {
    naming: &'a NamingContext,
    environment: &'a Environment,
}

impl<'a> ApiManager<'a> {
    pub fn new(naming: &'a NamingContext, environment: &'a Environment) -> Self {
        Self {
            naming,
            environment,
        }
    }

    /// Declare an HTTP API from the `apis` collection
    ///
    /// When `default_function` is set, the function is resolved from the
    /// `functions` collection and wired as the quick-create target.
    pub fn add_http_api(
        &self,
        stack: &mut Stack,
        blueprint: &Blueprint,
        key: &str,
    ) -> Result<String> {
        let entry = resolve(blueprint.apis.as_deref(), "apis", key)?;
        let api_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);

        let target = match &entry.default_function {
            Some(function_key) => {
                let function = resolve(blueprint.functions.as_deref(), "functions", function_key)?;
                Some(camel_case(&format!("{}-function", function.key)))
            }
            None => None,
        };

        let mut defaults = json!({
            "Name": api_name,
            "ProtocolType": "HTTP",
            "Tags": self.environment.default_tags(self.naming),
        });
        if let Some(description) = &entry.description {
            defaults["Description"] = json!(description);
        }
        if !entry.cors_allow_origins.is_empty() {
            defaults["CorsConfiguration"] = json!({
                "AllowOrigins": entry.cors_allow_origins,
            });
        }
        if let Some(function_logical) = &target {
            defaults["Target"] = get_att(function_logical, "Arn");
        }
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-api", entry.key));
        debug!(key = %entry.key, name = %api_name, "Declaring HTTP API");

        let mut resource = Resource::new("AWS::ApiGatewayV2::Api", properties);
        if let Some(function_logical) = target {
            resource = resource.with_dependency(function_logical);
        }
        stack.add_resource(&logical, resource)?;

        stack.add_output(Output::new(
            format!("{}-api-id", entry.key),
            reference(&logical),
        ))?;
        stack.add_output(Output::new(
            format!("{}-api-endpoint", entry.key),
            get_att(&logical, "ApiEndpoint"),
        ))?;

        Ok(logical)
    }

    /// Declare a custom domain from the `domains` collection
    ///
    /// The certificate and API are resolved by key from their collections;
    /// either reference failing aborts the call before declaration.
    pub fn add_domain(
        &self,
        stack: &mut Stack,
        blueprint: &Blueprint,
        key: &str,
    ) -> Result<String> {
        let entry = resolve(blueprint.domains.as_deref(), "domains", key)?;

        let certificate = resolve(
            blueprint.certificates.as_deref(),
            "certificates",
            &entry.certificate,
        )?;
        let certificate_logical = camel_case(&format!("{}-certificate", certificate.key));

        let api = resolve(blueprint.apis.as_deref(), "apis", &entry.api)?;
        let api_logical = camel_case(&format!("{}-api", api.key));

        let defaults = json!({
            "DomainName": entry.domain_name,
            "DomainNameConfigurations": [{
                "CertificateArn": reference(&certificate_logical),
                "EndpointType": "REGIONAL",
            }],
            "Tags": self.environment.default_tags(self.naming),
        });
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-domain", entry.key));
        debug!(key = %entry.key, domain = %entry.domain_name, "Declaring custom domain");
        stack.add_resource(
            &logical,
            Resource::new("AWS::ApiGatewayV2::DomainName", properties)
                .with_dependency(certificate_logical)
                .with_dependency(api_logical),
        )?;

        stack.add_output(Output::new(
            format!("{}-domain-name", entry.key),
            get_att(&logical, "RegionalDomainName"),
        ))?;

        Ok(logical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AwsError;
    use formwork_core::ResolveError;
    use formwork_core::model::{ApiConfig, CertificateConfig, DomainConfig};

    fn naming() -> NamingContext {
        NamingContext::new("media-stack", "dev").unwrap()
    }

    fn blueprint() -> Blueprint {
        Blueprint {
            apis: Some(vec![ApiConfig {
                key: "public".to_string(),
                name: "media-api".to_string(),
                cors_allow_origins: vec!["https://example.com".to_string()],
                ..Default::default()
            }]),
            certificates: Some(vec![CertificateConfig {
                key: "api".to_string(),
                domain_name: "api.example.com".to_string(),
                ..Default::default()
            }]),
            domains: Some(vec![DomainConfig {
                key: "api".to_string(),
                domain_name: "api.example.com".to_string(),
                certificate: "api".to_string(),
                api: "public".to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_http_api_with_cors() {
        let naming = naming();
        let environment = Environment::default();
        let manager = ApiManager::new(&naming, &environment);
        let blueprint = blueprint();
        let mut stack = Stack::new("media-stack");

        let logical = manager
            .add_http_api(&mut stack, &blueprint, "public")
            .unwrap();
        assert_eq!(logical, "publicApi");

        let resource = &stack.resources()["publicApi"];
        assert_eq!(resource.properties["Name"], "media-api-dev");
        assert_eq!(resource.properties["ProtocolType"], "HTTP");
        assert_eq!(
            resource.properties["CorsConfiguration"]["AllowOrigins"][0],
            "https://example.com"
        );

        assert!(stack.outputs().contains_key("publicApiId"));
        assert!(stack.outputs().contains_key("publicApiEndpoint"));
    }

    #[test]
    fn test_add_domain_resolves_certificate_and_api() {
        let naming = naming();
        let environment = Environment::default();
        let manager = ApiManager::new(&naming, &environment);
        let blueprint = blueprint();
        let mut stack = Stack::new("media-stack");

        let logical = manager.add_domain(&mut stack, &blueprint, "api").unwrap();
        assert_eq!(logical, "apiDomain");

        let resource = &stack.resources()["apiDomain"];
        assert_eq!(resource.properties["DomainName"], "api.example.com");
        assert_eq!(
            resource.properties["DomainNameConfigurations"][0]["CertificateArn"],
            json!({"Ref": "apiCertificate"})
        );
        assert_eq!(resource.depends_on, vec!["apiCertificate", "publicApi"]);
        assert!(stack.outputs().contains_key("apiDomainName"));
    }

    #[test]
    fn test_add_domain_with_unknown_certificate_fails_fast() {
        let naming = naming();
        let environment = Environment::default();
        let manager = ApiManager::new(&naming, &environment);

        let mut blueprint = blueprint();
        blueprint.domains.as_mut().unwrap()[0].certificate = "missing".to_string();
        let mut stack = Stack::new("media-stack");

        let result = manager.add_domain(&mut stack, &blueprint, "api");
        assert!(matches!(
            result,
            Err(AwsError::Resolve(ResolveError::ConfigurationNotFound { .. }))
        ));
        assert!(stack.resources().is_empty());
    }
}
