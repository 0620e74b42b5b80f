#![deny(missing_docs)]
//! Typed sentinels for environment variables.
//!
//! The [env_var!] macro generates a struct per variable so that config structs
//! can list the variables they need as fields and fail as a unit when one is
//! missing.

// Re-export paste so users don't need to depend on it directly
pub use paste;
use thiserror::Error;

/// The error produced when an environment variable cannot be read
#[derive(Debug, Error)]
#[error("unable to read env var {var_name}: {err}")]
pub struct EnvVarErr {
    var_name: &'static str,
    err: std::env::VarError,
}

/// Reads the named variable from the process environment
pub fn read_env(var_name: &'static str) -> Result<String, EnvVarErr> {
    std::env::var(var_name).map_err(|err| EnvVarErr { var_name, err })
}

/// Generates a sentinel struct for one environment variable, or a container
/// struct whose fields are sentinel structs.
///
/// The variable name is the SCREAMING_SNAKE_CASE form of the struct name.
#[macro_export]
macro_rules! env_var {
    (
        $(#[$attr:meta])*
        $v:vis struct $n:ident;
    ) => {
        $crate::paste::paste! {
            #[doc = "Sentinel for the `" $n:snake:upper "` environment variable."]
            $(#[$attr])*
            $v struct $n(std::sync::Arc<str>);

            impl $n {
                #[doc = "Reads `" $n:snake:upper "` from the environment."]
                #[allow(dead_code)]
                #[tracing::instrument(err)]
                $v fn new() -> Result<Self, $crate::EnvVarErr> {
                    let value = $crate::read_env(stringify!([<$n:snake:upper>]))?;
                    Ok(Self(std::sync::Arc::from(value)))
                }

                #[doc = "Calls [Self::new] and panics when the variable is absent."]
                #[allow(dead_code)]
                $v fn unwrap_new() -> Self {
                    Self::new().expect(concat!(
                        "missing env var ",
                        stringify!([<$n:snake:upper>])
                    ))
                }

                #[doc = "Builds the sentinel from a literal value, bypassing the environment."]
                #[allow(dead_code)]
                $v fn new_from(value: &str) -> Self {
                    Self(std::sync::Arc::from(value))
                }
            }

            impl std::ops::Deref for $n {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    &self.0
                }
            }

            impl std::convert::AsRef<str> for $n {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        }
    };
    (
        $(#[$attr:meta])*
        $v:vis struct $n:ident {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field_name:ident
            ),* $(,)?
        }
    ) => {
        $crate::paste::paste! {
            $(
                $crate::env_var!(
                    $(#[$field_attr])*
                    $field_vis struct $field_name;
                );
            )*

            #[doc = "Container reading every listed environment variable as a unit."]
            $(#[$attr])*
            pub struct $n {
                $(
                    #[doc = "The `" $field_name:snake:upper "` variable."]
                    pub [<$field_name:snake>]: $field_name,
                )*
            }

            impl $n {
                #[doc = "Reads every variable, failing on the first one that is absent."]
                #[allow(dead_code)]
                $v fn new() -> Result<Self, $crate::EnvVarErr> {
                    Ok(Self {
                        $(
                            [<$field_name:snake>]: $field_name::new()?,
                        )*
                    })
                }

                #[doc = "Calls [Self::new] and panics when any variable is absent."]
                #[allow(dead_code)]
                $v fn unwrap_new() -> Self {
                    Self::new().expect("missing env var")
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    env_var! {
        #[derive(Clone)]
        struct DoctrackEnvVarProbe;
    }

    env_var! {
        struct ProbeBundle {
            BundleVarOne,
            BundleVarTwo,
        }
    }

    env_var! {
        #[derive(Debug)]
        struct DoctrackAbsentProbe;
    }

    #[test]
    fn reads_present_variable() {
        unsafe { std::env::set_var("DOCTRACK_ENV_VAR_PROBE", "probe-value") };
        let var = DoctrackEnvVarProbe::new().unwrap();
        assert_eq!(var.as_ref(), "probe-value");
        assert_eq!(&*var.clone(), "probe-value");
    }

    #[test]
    fn missing_variable_is_an_error() {
        let err = DoctrackAbsentProbe::new().unwrap_err();
        assert!(err.to_string().contains("DOCTRACK_ABSENT_PROBE"));
    }

    #[test]
    fn bundle_reads_all_fields() {
        unsafe {
            std::env::set_var("BUNDLE_VAR_ONE", "one");
            std::env::set_var("BUNDLE_VAR_TWO", "two");
        }
        let bundle = ProbeBundle::new().unwrap();
        assert_eq!(bundle.bundle_var_one.as_ref(), "one");
        assert_eq!(bundle.bundle_var_two.as_ref(), "two");
    }

    #[test]
    fn new_from_bypasses_environment() {
        let var = DoctrackEnvVarProbe::new_from("literal");
        assert_eq!(&*var, "literal");
    }
}
