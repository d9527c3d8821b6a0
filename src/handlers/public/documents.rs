// handlers/public/documents.rs - GET /api/documents/* handlers
//
// Static legal texts shown by the mobile client. Public, no storage access.

use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};

pub const TERMS_OF_SERVICE: &str = "Terms of Service\n\
Last Updated: 01.01.2025\n\
\n\
By using the App, you agree to the following Terms of Service. Please read them carefully.\n\
\n\
1. Open-Source License\n\
The App is released under the MIT License. You are free to use, modify, and distribute the App in accordance with the terms of the license. The source code is available at GitHub.\n\
\n\
2. No Warranty\n\
The App is provided \"as is,\" without any warranties or guarantees of any kind, express or implied. The developers of the App are not liable for any damages or losses resulting from your use of the App.\n\
\n\
3. Your Responsibilities\n\
You are responsible for:\n\
\n\
Ensuring the security of your device and data.\n\
\n\
Backing up your data to prevent loss.\n\
\n\
Complying with applicable laws and regulations when using the App.\n\
\n\
4. Third-Party Services\n\
If you integrate the App with third-party services, you agree to comply with their terms of service and privacy policies. We are not responsible for any issues arising from the use of third-party services.\n\
\n\
5. Modifications to the App\n\
As an open-source project, the App may be modified by you or other contributors. We are not responsible for any changes made by third parties.\n\
\n\
6. Termination\n\
You may stop using the App at any time. We reserve the right to discontinue or modify the App at any time without notice.\n\
\n\
8. Contact Us\n\
If you have any questions about these Terms of Service, please contact visit the project repository at GitHub.";

pub const PRIVACY_POLICY: &str = "Privacy Policy\n\
Last Updated: 01.01.2025\n\
\n\
Thank you for using the App. This Privacy Policy explains how we handle your information when you use our open-source to-do app. Since the App is open-source, you are in control of your data and how it is used.\n\
\n\
1. Information We Do Not Collect\n\
The App is designed to respect your privacy. We do not collect, store, or transmit any personal data or usage information. All data created or managed by you (e.g., tasks, reminders, or notes) is stored locally on your device unless you choose to sync it with a third-party service.\n\
\n\
2. Open-Source Nature\n\
The App is open-source, meaning the source code is publicly available for review, modification, and distribution. You can inspect the code to verify that no data is being collected or transmitted without your consent.\n\
\n\
3. Third-Party Services\n\
If you choose to integrate the App with third-party services (e.g., cloud storage or backup services), your data will be subject to the privacy policies of those services. We are not responsible for the practices of third-party services.\n\
\n\
4. Data Security\n\
Since the App does not collect or store your data on external servers, your data remains on your device. You are responsible for securing your device and any backups you create.\n\
\n\
5. Changes to This Policy\n\
We may update this Privacy Policy from time to time. Any changes will be posted on this page, and the \"Last Updated\" date will be revised.\n\
\n\
6. Contact Us\n\
If you have any questions about this Privacy Policy, please visit the project repository at GitHub.";

/// GET /api/documents/getPolicy - `{"data": <terms of service>}`
pub async fn policy() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({ "data": TERMS_OF_SERVICE })))
}

/// GET /api/documents/getPrivacy - `{"data": <privacy policy>}`
pub async fn privacy() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({ "data": PRIVACY_POLICY })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_start_with_their_title() {
        assert!(TERMS_OF_SERVICE.starts_with("Terms of Service\nLast Updated: 01.01.2025\n\n"));
        assert!(PRIVACY_POLICY.starts_with("Privacy Policy\nLast Updated: 01.01.2025\n\n"));
        assert!(TERMS_OF_SERVICE.contains("\"as is,\""));
    }
}
