//! 探测工具集成测试
//!
//! 通过PATH中的伪造 pgrep/docker 脚本验证探测器对真实工具输出的处理

#![cfg(unix)]

use minecraft_vitals::health::{DockerProber, ProcessProber, Prober};
use serial_test::serial;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

/// 在目录下写入一个可执行的伪造工具脚本
fn write_fake_tool(dir: &Path, name: &str, script: &str) {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// PATH环境变量守卫，作用域结束时恢复原值
struct PathGuard {
    original: OsString,
}

impl PathGuard {
    /// 将目录前置到PATH，伪造工具优先于真实工具
    fn prepend(dir: &Path) -> Self {
        let original = std::env::var_os("PATH").unwrap_or_default();
        let mut paths = vec![dir.to_path_buf()];
        paths.extend(std::env::split_paths(&original));
        std::env::set_var("PATH", std::env::join_paths(paths).unwrap());
        Self { original }
    }

    /// 将PATH替换为仅含指定目录
    fn replace(dir: &Path) -> Self {
        let original = std::env::var_os("PATH").unwrap_or_default();
        std::env::set_var("PATH", dir);
        Self { original }
    }
}

impl Drop for PathGuard {
    fn drop(&mut self) {
        std::env::set_var("PATH", &self.original);
    }
}

#[tokio::test]
#[serial]
async fn test_process_prober_reports_up_with_matching_pids() {
    let dir = TempDir::new().unwrap();
    write_fake_tool(dir.path(), "pgrep", "#!/bin/sh\necho 4242\necho 4243\nexit 0\n");
    let _guard = PathGuard::prepend(dir.path());

    let result = ProcessProber::new("bedrock_server").probe().await;

    assert!(result.is_up());
    let detail = result.detail.unwrap();
    assert_eq!(detail["pids"], serde_json::json!([4242, 4243]));
}

#[tokio::test]
#[serial]
async fn test_process_prober_reports_down_on_no_match() {
    // pgrep 退出码1表示无匹配进程
    let dir = TempDir::new().unwrap();
    write_fake_tool(dir.path(), "pgrep", "#!/bin/sh\nexit 1\n");
    let _guard = PathGuard::prepend(dir.path());

    let result = ProcessProber::new("bedrock_server").probe().await;

    assert!(!result.is_up());
    assert!(result.detail.is_none());
}

#[tokio::test]
#[serial]
async fn test_process_prober_records_tool_failure() {
    // 退出码2表示 pgrep 自身出错，作为带错误详情的未运行处理
    let dir = TempDir::new().unwrap();
    write_fake_tool(
        dir.path(),
        "pgrep",
        "#!/bin/sh\necho 'pgrep: invalid option' >&2\nexit 2\n",
    );
    let _guard = PathGuard::prepend(dir.path());

    let result = ProcessProber::new("bedrock_server").probe().await;

    assert!(!result.is_up());
    let detail = result.detail.unwrap();
    assert!(detail["error"].as_str().unwrap().contains("退出码 2"));
}

#[tokio::test]
#[serial]
async fn test_docker_prober_reports_up_container() {
    let dir = TempDir::new().unwrap();
    write_fake_tool(dir.path(), "docker", "#!/bin/sh\necho 'Up 3 hours'\nexit 0\n");
    let _guard = PathGuard::prepend(dir.path());

    let result = DockerProber::new("paper").probe().await;

    assert!(result.is_up());
    let detail = result.detail.unwrap();
    assert_eq!(detail["container_status"], "Up 3 hours");
}

#[tokio::test]
#[serial]
async fn test_docker_prober_reports_down_when_absent() {
    // docker ps 过滤无结果时输出为空
    let dir = TempDir::new().unwrap();
    write_fake_tool(dir.path(), "docker", "#!/bin/sh\nexit 0\n");
    let _guard = PathGuard::prepend(dir.path());

    let result = DockerProber::new("paper").probe().await;

    assert!(!result.is_up());
    assert!(result.detail.is_none());
}

#[tokio::test]
#[serial]
async fn test_docker_prober_reports_down_for_exited_container() {
    let dir = TempDir::new().unwrap();
    write_fake_tool(
        dir.path(),
        "docker",
        "#!/bin/sh\necho 'Exited (1) 2 days ago'\nexit 0\n",
    );
    let _guard = PathGuard::prepend(dir.path());

    let result = DockerProber::new("paper").probe().await;

    assert!(!result.is_up());
    let detail = result.detail.unwrap();
    assert_eq!(detail["container_status"], "Exited (1) 2 days ago");
}

#[tokio::test]
#[serial]
async fn test_docker_survey_collects_containers_and_target() {
    // 伪造 docker：ps -a 列出容器，inspect 返回完整JSON文档
    let script = r#"#!/bin/sh
case "$1" in
  ps)
    for arg in "$@"; do
      if [ "$arg" = "-a" ]; then
        printf 'paper\tUp 3 hours\titzg/minecraft-server\n'
        printf 'web\tExited (0) 5 days ago\tnginx:latest\n'
        exit 0
      fi
    done
    echo 'Up 3 hours'
    ;;
  inspect)
    echo '[{"Name":"/paper","State":{"Status":"running","Running":true,"Pid":31337}}]'
    ;;
esac
exit 0
"#;
    let dir = TempDir::new().unwrap();
    write_fake_tool(dir.path(), "docker", script);
    let _guard = PathGuard::prepend(dir.path());

    let survey = DockerProber::new("paper").survey().await;

    let containers = survey["all_containers"].as_array().unwrap();
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0]["name"], "paper");
    assert_eq!(containers[0]["image"], "itzg/minecraft-server");

    assert_eq!(survey["target_container"]["name"], "/paper");
    assert_eq!(survey["target_container"]["state"]["Status"], "running");
    assert_eq!(survey["target_container"]["state"]["Pid"], 31337);
}

#[tokio::test]
#[serial]
async fn test_docker_survey_marks_missing_target() {
    // inspect 对不存在的容器返回非零退出码
    let script = r#"#!/bin/sh
case "$1" in
  ps) exit 0 ;;
  inspect)
    echo 'Error: No such object: paper' >&2
    exit 1
    ;;
esac
exit 0
"#;
    let dir = TempDir::new().unwrap();
    write_fake_tool(dir.path(), "docker", script);
    let _guard = PathGuard::prepend(dir.path());

    let survey = DockerProber::new("paper").survey().await;

    assert_eq!(survey["target_container"], "not_found");
    assert_eq!(survey["all_containers"], serde_json::json!([]));
}

#[tokio::test]
#[serial]
async fn test_verify_tool_fails_when_binary_missing() {
    // PATH中只有空目录，pgrep 与 docker 均无法解析
    let dir = TempDir::new().unwrap();
    let _guard = PathGuard::replace(dir.path());

    assert!(ProcessProber::new("bedrock_server")
        .verify_tool()
        .await
        .is_err());
    assert!(DockerProber::new("paper").verify_tool().await.is_err());
}

#[tokio::test]
#[serial]
async fn test_verify_tool_tolerates_nonzero_version_exit() {
    // busybox 等实现对 --version 可能返回非零，只要可执行就视为可用
    let dir = TempDir::new().unwrap();
    write_fake_tool(dir.path(), "pgrep", "#!/bin/sh\nexit 2\n");
    let _guard = PathGuard::prepend(dir.path());

    assert!(ProcessProber::new("bedrock_server")
        .verify_tool()
        .await
        .is_ok());
}

#[tokio::test]
#[serial]
async fn test_probe_absorbs_missing_binary_as_down() {
    // 运行期工具消失不会导致panic或错误，探测结果为未运行并带错误详情
    let dir = TempDir::new().unwrap();
    let _guard = PathGuard::replace(dir.path());

    let result = ProcessProber::new("bedrock_server").probe().await;

    assert!(!result.is_up());
    let detail = result.detail.unwrap();
    assert!(detail["error"].is_string());
}

#[tokio::test]
#[serial]
async fn test_process_survey_records_error_per_pattern() {
    // 工具缺失时每个模式的搜索结果是各自独立的error字段
    let dir = TempDir::new().unwrap();
    let _guard = PathGuard::replace(dir.path());

    let survey = ProcessProber::new("custom_server_xyz").survey().await;
    let map = survey.as_object().unwrap();

    assert_eq!(map.len(), 5);
    for (pattern, scan) in map {
        assert!(
            scan["error"].as_str().unwrap().contains("pgrep"),
            "模式 {pattern} 未记录错误: {scan}"
        );
    }
}

#[tokio::test]
#[serial]
async fn test_docker_survey_records_errors_when_binary_missing() {
    // 工具缺失时容器列表与目标详情两个小节分别记录错误
    let dir = TempDir::new().unwrap();
    let _guard = PathGuard::replace(dir.path());

    let survey = DockerProber::new("paper").survey().await;

    assert!(survey["error"].as_str().unwrap().contains("docker"));
    assert!(survey["target_container_error"]
        .as_str()
        .unwrap()
        .contains("docker"));
    assert!(survey.get("all_containers").is_none());
    assert!(survey.get("target_container").is_none());
}

#[tokio::test]
#[serial]
async fn test_docker_survey_sections_fail_independently() {
    // ps -a 失败只影响容器列表小节，inspect 小节照常返回
    let script = r#"#!/bin/sh
case "$1" in
  ps)
    echo 'Cannot connect to the Docker daemon' >&2
    exit 1
    ;;
  inspect)
    echo '[{"Name":"/paper","State":{"Status":"running","Running":true}}]'
    ;;
esac
exit 0
"#;
    let dir = TempDir::new().unwrap();
    write_fake_tool(dir.path(), "docker", script);
    let _guard = PathGuard::prepend(dir.path());

    let survey = DockerProber::new("paper").survey().await;

    assert!(survey["error"].as_str().unwrap().contains("Docker daemon"));
    assert!(survey.get("all_containers").is_none());
    assert_eq!(survey["target_container"]["name"], "/paper");
    assert_eq!(survey["target_container"]["state"]["Status"], "running");
}
