use std::env;

fn main() {
    // EMPLOYEE_API_URL をビルド時に埋め込む（未設定なら実行時に既定値を使う）
    if let Ok(url) = env::var("EMPLOYEE_API_URL") {
        if !url.trim().is_empty() {
            println!("cargo:warning=EMPLOYEE_API_URL set to {}", url);
            println!("cargo:rustc-env=EMPLOYEE_API_URL={}", url.trim());
        }
    }

    // 環境変数変更時に再ビルド
    println!("cargo:rerun-if-env-changed=EMPLOYEE_API_URL");
}
