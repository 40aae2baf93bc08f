//! Key fixture shared by unit tests.

/// RSA-2048 public key in SubjectPublicKeyInfo form.
pub const PUBLIC_KEY_PEM: &str = r#"-----BEGIN PUBLIC KEY-----
MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAzLULF/35I4X3cGE2ZDcc
x2az7c3dktYz7bFkrY5D1ETyHfZJKyyhFPOW9IdC8VIoML7DFx7N5IA8o5DbIkv6
pWjTCAH1+mXpBTxyal4I9nNI/fLDeI9wfvprSQiI1LLRh26MQo8PQ7gk2YIFAI1w
lnNw6gOHX+hZBXLKpdWsNz9APuL4FQBlQgWjHsMJMel+wBemtpYNmw91Vgtdd3Bn
feXHS5fs+kVOJdN0QWgofpE3WHOI/6+k79Fe1+GJb2a6ApjtyPClD9cq05ffIUnd
xu/bTXaCzWfr7OBXpTVRRr/rMaBM6QzUVqrXYX+NfVfdSsIWQGJf+zcEWoec0Pzv
IQIDAQAB
-----END PUBLIC KEY-----"#;
