//! Plan builder - turns a resolution into ordered components.

use super::{Component, Op, Phase, Plan, Secret};
use crate::data_bag::SensuDataBag;
use crate::policy::ssl::{SSL_DIR, SSL_FILE_GROUP, SSL_FILE_MODE};
use crate::policy::{ResolutionResult, SslFile};

/// Build the plan for a resolved node.
///
/// PEM content comes from `ssl.server` in the data bag. The SSL component
/// is only emitted when SSL is enabled.
pub fn build_plan(result: &ResolutionResult, bag: &SensuDataBag) -> Plan {
    let mut components = vec![erlang(result)];
    if result.ssl.enabled() {
        components.push(ssl(bag));
    }
    components.push(credentials(result));
    Plan { components }
}

fn erlang(result: &ResolutionResult) -> Component {
    Component {
        name: "erlang",
        phase: Phase::Packages,
        ops: result
            .packages
            .iter()
            .map(|p| Op::Package {
                name: p.name,
                install: p.install,
            })
            .collect(),
    }
}

fn ssl(bag: &SensuDataBag) -> Component {
    let mut ops = vec![Op::Dir {
        path: SSL_DIR.into(),
        recursive: true,
    }];
    for file in SslFile::ALL {
        ops.push(Op::File {
            path: file.path(),
            group: SSL_FILE_GROUP,
            mode: SSL_FILE_MODE,
            content: Secret::new(bag.server_pem(file)),
        });
    }
    Component {
        name: "ssl",
        phase: Phase::Files,
        ops,
    }
}

fn credentials(result: &ResolutionResult) -> Component {
    let mut ops = Vec::with_capacity(result.credentials.len() * 2);
    for record in &result.credentials {
        ops.push(Op::Vhost(record.vhost.clone()));
        ops.push(Op::BrokerUser {
            name: record.user.clone(),
            password: Secret::new(record.password.clone()),
            vhost: record.vhost.clone(),
            permissions: record.permissions.clone(),
        });
    }
    Component {
        name: "credentials",
        phase: Phase::Broker,
        ops,
    }
}
